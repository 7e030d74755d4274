use chrono::{DateTime, Utc};
use eframe::egui::Color32;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const MAX_SCORE: f32 = 100.0;

pub const BASE_NODE_RADIUS: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "Technical")]
    Technical,
    #[serde(alias = "Soft Skills", alias = "SoftSkills", alias = "softSkills")]
    SoftSkills,
    #[serde(
        alias = "Additional Skills",
        alias = "AdditionalSkills",
        alias = "additionalSkills"
    )]
    AdditionalSkills,
    #[serde(alias = "Achievements")]
    Achievements,
    #[serde(alias = "Learning")]
    Learning,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Technical,
        Self::SoftSkills,
        Self::AdditionalSkills,
        Self::Achievements,
        Self::Learning,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::SoftSkills => "Soft Skills",
            Self::AdditionalSkills => "Additional Skills",
            Self::Achievements => "Achievements",
            Self::Learning => "Learning",
        }
    }

    pub fn slot(self) -> usize {
        match self {
            Self::Technical => 0,
            Self::SoftSkills => 1,
            Self::AdditionalSkills => 2,
            Self::Achievements => 3,
            Self::Learning => 4,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::Technical => Color32::from_rgb(77, 166, 255),
            Self::SoftSkills => Color32::from_rgb(255, 140, 186),
            Self::AdditionalSkills => Color32::from_rgb(126, 217, 143),
            Self::Achievements => Color32::from_rgb(255, 204, 77),
            Self::Learning => Color32::from_rgb(178, 132, 255),
        }
    }
}

// `score` and `xp` may arrive missing, null or non-finite; sanitize before layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNode {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub score: f32,
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub xp: f32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

fn missing_number() -> f32 {
    f32::NAN
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

impl SkillNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        score: f32,
        xp: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            score,
            xp,
            last_updated: None,
            details: Map::new(),
        }
    }

    pub fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    pub fn sanitized(mut self) -> Self {
        self.score = if self.score.is_finite() {
            self.score.clamp(0.0, MAX_SCORE)
        } else if self.score == f32::INFINITY {
            MAX_SCORE
        } else {
            0.0
        };
        // An infinite xp would give an unbounded radius, so it counts as missing.
        self.xp = if self.xp.is_finite() {
            self.xp.max(0.0)
        } else {
            0.0
        };
        self
    }

    pub fn score_fraction(&self) -> f32 {
        (self.score / MAX_SCORE).clamp(0.0, 1.0)
    }

    pub fn visual_radius(&self) -> f32 {
        BASE_NODE_RADIUS + self.xp / 10.0
    }
}
