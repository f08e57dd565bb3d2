use crate::error::{ErrorSeverity, NeedsError};

/// Problems found while decoding record values.
///
/// Decoders recover field by field wherever they can; these errors describe
/// the records that had to be dropped entirely.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("food slot needs at least {min} fields, found {found}")]
    TooFewFields { found: usize, min: usize },

    #[error("skill entry '{0}' is not id:level:accumulator")]
    MalformedSkillEntry(String),

    #[error("unknown skill id '{0}'")]
    UnknownSkill(String),

    #[error("rested entry '{0}' is not total:elapsed:comfort")]
    MalformedRested(String),
}

impl NeedsError for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooFewFields { .. } => "CODEC_TOO_FEW_FIELDS",
            Self::MalformedSkillEntry(_) => "CODEC_MALFORMED_SKILL_ENTRY",
            Self::UnknownSkill(_) => "CODEC_UNKNOWN_SKILL",
            Self::MalformedRested(_) => "CODEC_MALFORMED_RESTED",
        }
    }
}
