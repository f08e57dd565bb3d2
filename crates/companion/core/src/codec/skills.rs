//! Skill ledger format: `id:level:accumulator` entries joined by `;`.

use std::str::FromStr;

use crate::state::{MAX_SKILL_LEVEL, SkillId, SkillRecord, sanitize};

use super::error::CodecError;

/// Encodes every non-blank skill. An empty ledger encodes as the empty string.
pub fn encode_skills<'a>(skills: impl IntoIterator<Item = (&'a SkillId, &'a SkillRecord)>) -> String {
    skills
        .into_iter()
        .filter(|(_, record)| !record.is_blank())
        .map(|(skill, record)| {
            format!(
                "{}:{}:{}",
                skill,
                sanitize(record.level),
                sanitize(record.accumulator)
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Decodes a ledger, keeping every readable entry.
///
/// Malformed entries and unknown skill ids are returned separately so the
/// caller can log them; they never invalidate the rest of the ledger.
pub fn decode_skills(raw: &str) -> (Vec<(SkillId, SkillRecord)>, Vec<CodecError>) {
    let mut skills = Vec::new();
    let mut rejected = Vec::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        match decode_entry(entry) {
            Ok(decoded) => skills.push(decoded),
            Err(error) => rejected.push(error),
        }
    }

    (skills, rejected)
}

fn decode_entry(entry: &str) -> Result<(SkillId, SkillRecord), CodecError> {
    let mut parts = entry.split(':');
    let (Some(id), Some(level), Some(accumulator), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CodecError::MalformedSkillEntry(entry.to_owned()));
    };

    let skill =
        SkillId::from_str(id.trim()).map_err(|_| CodecError::UnknownSkill(id.trim().to_owned()))?;
    let level = number(level).clamp(0.0, MAX_SKILL_LEVEL);
    let accumulator = number(accumulator).max(0.0);

    Ok((skill, SkillRecord::new(level, accumulator)))
}

fn number(field: &str) -> f32 {
    field.trim().parse::<f32>().map(sanitize).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn ledger_round_trips_and_skips_blank_skills() {
        let mut ledger = BTreeMap::new();
        ledger.insert(SkillId::Swords, SkillRecord::new(12.0, 3.5));
        ledger.insert(SkillId::Run, SkillRecord::new(0.0, 0.0));
        ledger.insert(SkillId::WoodCutting, SkillRecord::new(0.0, 0.75));

        let encoded = encode_skills(&ledger);
        assert_eq!(encoded, "Swords:12:3.5;WoodCutting:0:0.75");

        let (decoded, rejected) = decode_skills(&encoded);
        assert!(rejected.is_empty());
        assert_eq!(
            decoded,
            vec![
                (SkillId::Swords, SkillRecord::new(12.0, 3.5)),
                (SkillId::WoodCutting, SkillRecord::new(0.0, 0.75)),
            ]
        );
    }

    #[test]
    fn empty_ledger_is_valid() {
        let (decoded, rejected) = decode_skills("");
        assert!(decoded.is_empty());
        assert!(rejected.is_empty());
        assert_eq!(encode_skills(&BTreeMap::new()), "");
    }

    #[test]
    fn unknown_and_malformed_entries_are_dropped() {
        let (decoded, rejected) = decode_skills("Dancing:5:0;Axes:7:1;broken;Bows:x:2");
        assert_eq!(
            decoded,
            vec![
                (SkillId::Axes, SkillRecord::new(7.0, 1.0)),
                (SkillId::Bows, SkillRecord::new(0.0, 2.0)),
            ]
        );
        assert_eq!(
            rejected,
            vec![
                CodecError::UnknownSkill("Dancing".into()),
                CodecError::MalformedSkillEntry("broken".into()),
            ]
        );
    }

    #[test]
    fn out_of_range_levels_are_clamped() {
        let (decoded, _) = decode_skills("Clubs:250:-4");
        assert_eq!(decoded, vec![(SkillId::Clubs, SkillRecord::new(100.0, 0.0))]);
    }
}
