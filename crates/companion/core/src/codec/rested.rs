//! Rested buff format: `total:elapsed:comfort`, empty when inactive.

use crate::state::{RestedBuffState, sanitize};

use super::error::CodecError;

pub fn encode_rested(state: &RestedBuffState) -> String {
    if !state.active {
        return String::new();
    }
    format!(
        "{:.1}:{:.1}:{}",
        sanitize(state.total_duration),
        sanitize(state.elapsed),
        state.comfort_level
    )
}

/// Decodes the active part of a rested buff. Warmup progress is host-local
/// and never replicated, so the returned state is never accumulating.
pub fn decode_rested(raw: &str) -> Result<RestedBuffState, CodecError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(RestedBuffState::default());
    }

    let parts: Vec<&str> = raw.split(':').collect();
    let [total, elapsed, comfort] = parts.as_slice() else {
        return Err(CodecError::MalformedRested(raw.to_owned()));
    };

    let total_duration = total.trim().parse::<f32>().map(sanitize).unwrap_or(0.0);
    let elapsed = elapsed.trim().parse::<f32>().map(sanitize).unwrap_or(0.0);
    let comfort_level = comfort.trim().parse::<i32>().unwrap_or(1).max(1);

    if total_duration <= elapsed {
        return Ok(RestedBuffState::default());
    }

    Ok(RestedBuffState {
        active: true,
        total_duration,
        elapsed: elapsed.max(0.0),
        comfort_level,
        ..RestedBuffState::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_buff_round_trips() {
        let state = RestedBuffState {
            active: true,
            total_duration: 600.0,
            elapsed: 42.5,
            comfort_level: 3,
            ..RestedBuffState::default()
        };
        assert_eq!(decode_rested(&encode_rested(&state)), Ok(state));
    }

    #[test]
    fn inactive_or_spent_buff_decodes_as_default() {
        assert_eq!(encode_rested(&RestedBuffState::default()), "");
        assert_eq!(decode_rested(""), Ok(RestedBuffState::default()));
        assert_eq!(decode_rested("480:480:1"), Ok(RestedBuffState::default()));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(decode_rested("480:1").is_err());
    }
}
