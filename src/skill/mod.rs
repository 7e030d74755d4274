mod filter;
mod load;
mod node;
mod sample;

pub use filter::NodeFilter;
pub use load::{load_nodes, parse_nodes};
pub use node::{BASE_NODE_RADIUS, Category, MAX_SCORE, SkillNode};
pub use sample::sample_nodes;
