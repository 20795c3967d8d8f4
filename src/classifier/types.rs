use serde::{Deserialize, Serialize};

/// The closed 3-class vocabulary of the tomato model.
///
/// Wire names match the class order the model was trained with; no
/// "unknown" class exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    #[serde(rename = "Tomato_Early_blight")]
    EarlyBlight,

    #[serde(rename = "Tomato_Late_blight")]
    LateBlight,

    #[serde(rename = "Tomato_healthy")]
    Healthy,
}

impl ClassLabel {
    /// Labels in model output order (index 0..3).
    pub const ALL: [ClassLabel; 3] = [
        ClassLabel::EarlyBlight,
        ClassLabel::LateBlight,
        ClassLabel::Healthy,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::EarlyBlight => "Tomato_Early_blight",
            ClassLabel::LateBlight => "Tomato_Late_blight",
            ClassLabel::Healthy => "Tomato_healthy",
        }
    }

    /// Human-readable form used in reports (underscores replaced by spaces).
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub label: ClassLabel,

    /// Maximum value of the 3-class output vector, in [0, 1].
    pub confidence: f32,
}
