//! Emotion Context - Value Objects

use serde::{Deserialize, Serialize};

use super::EmotionError;

/// 情绪代码 → 动作映射表（下标即代码）
const EMOTION_TABLE: [EmotionAction; 10] = [
    EmotionAction::Idle,
    EmotionAction::HeadPain,
    EmotionAction::Happy,
    EmotionAction::Shrug,
    EmotionAction::HeadNod,
    EmotionAction::HeadShake,
    EmotionAction::WrithingInPain,
    EmotionAction::Sad,
    EmotionAction::ArmStretch,
    EmotionAction::NeckStretch,
];

/// 情绪代码（0-9）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EmotionCode(u8);

impl EmotionCode {
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Result<Self, EmotionError> {
        if value > Self::MAX {
            return Err(EmotionError::InvalidCode(value));
        }
        Ok(Self(value))
    }

    /// 从单个 ASCII 数字解析
    pub fn from_digit(ch: char) -> Option<Self> {
        ch.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// 该代码对应的角色动作
    pub fn action(&self) -> EmotionAction {
        EMOTION_TABLE[self.0 as usize]
    }
}

impl TryFrom<u8> for EmotionCode {
    type Error = EmotionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmotionCode> for u8 {
    fn from(code: EmotionCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for EmotionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 角色反应动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionAction {
    Idle,
    HeadPain,
    Happy,
    Shrug,
    HeadNod,
    HeadShake,
    WrithingInPain,
    Sad,
    /// 同时显示流血特效
    ArmStretch,
    NeckStretch,
}

impl EmotionAction {
    /// 按代码顺序排列的全部动作
    pub const ALL: [EmotionAction; 10] = EMOTION_TABLE;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::HeadPain => "head_pain",
            Self::Happy => "happy",
            Self::Shrug => "shrug",
            Self::HeadNod => "head_nod",
            Self::HeadShake => "head_shake",
            Self::WrithingInPain => "writhing_in_pain",
            Self::Sad => "sad",
            Self::ArmStretch => "arm_stretch",
            Self::NeckStretch => "neck_stretch",
        }
    }

    /// 是否需要同时打开流血特效
    pub fn shows_blood(&self) -> bool {
        matches!(self, Self::ArmStretch)
    }
}

impl std::fmt::Display for EmotionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
