//! Format-detecting parser for artifact identifiers.
//!
//! The structural prefix selects one grammar; the grammar anchors the phase
//! token and the trailing three-digit sequence so that an artifact type with
//! internal hyphens (`REQ-TRC`) comes back intact in every format.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{ArtifactId, IdFormat};
use crate::error::ParseOutcome;

static COMPACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^AMPEL360_Q100_(MSN[0-9]{3})_ATA([0-9]{2}|IN)-([0-9]{2})-([0-9]{2})_(LC[0-9]{2})_([A-Z0-9]+(?:-[A-Z0-9]+)*)_([0-9]{3})$",
    )
    .expect("compact identifier regex")
});

static HYPHENATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^AMPEL360-Q100-(MSN[0-9]{3})-ATA([0-9]{2}|IN)-([0-9]{2})-([0-9]{2})-(LC[0-9]{2})-([A-Z0-9]+(?:-[A-Z0-9]+)*)-([0-9]{3})$",
    )
    .expect("hyphenated identifier regex")
});

static URN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^urn:ampel360:q100:(msn[0-9]{3}):ata([0-9]{2}|in)-([0-9]{2})-([0-9]{2}):(lc[0-9]{2}):([a-z0-9]+(?:-[a-z0-9]+)*):([0-9]{3})$",
    )
    .expect("urn identifier regex")
});

// URN tokens are lowercase on the wire; fields are canonical uppercase.
fn field(caps: &Captures<'_>, i: usize, format: IdFormat) -> String {
    let raw = &caps[i];
    match format {
        IdFormat::Urn => raw.to_uppercase(),
        _ => raw.to_string(),
    }
}

fn grammar(format: IdFormat) -> &'static Regex {
    match format {
        IdFormat::Compact => &COMPACT_RE,
        IdFormat::Hyphenated => &HYPHENATED_RE,
        IdFormat::Urn => &URN_RE,
    }
}

/// Check `input` against the grammar selected by its prefix.
pub fn check_identifier(input: &str) -> ParseOutcome<ArtifactId> {
    let Some(format) = IdFormat::detect(input) else {
        return ParseOutcome::Malformed;
    };
    check_as(input, format)
}

/// Check `input` against one specific grammar, skipping prefix detection.
pub fn check_as(input: &str, format: IdFormat) -> ParseOutcome<ArtifactId> {
    let Some(caps) = grammar(format).captures(input) else {
        return ParseOutcome::Malformed;
    };

    // `[0-9]{3}` always fits in u16; range is enforced by construction.
    let sequence: u16 = match caps[7].parse() {
        Ok(n) => n,
        Err(_) => return ParseOutcome::Malformed,
    };

    ParseOutcome::from_construction(ArtifactId::new(
        &field(&caps, 1, format),
        &field(&caps, 2, format),
        &caps[3],
        &caps[4],
        &field(&caps, 5, format),
        &field(&caps, 6, format),
        sequence,
    ))
}

/// Parse any of the three formats, `None` if the input is unparseable.
pub fn parse_identifier(input: &str) -> Option<ArtifactId> {
    check_identifier(input).ok()
}

/// Validate an identifier string, returning the failure reason when invalid.
pub fn validate_identifier(input: &str) -> (bool, Option<String>) {
    let outcome = check_identifier(input);
    (outcome.is_parsed(), outcome.reason())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdField;
    use crate::taxonomy::LifecyclePhase;

    #[test]
    fn test_parse_compact_format() {
        let id = parse_identifier("AMPEL360_Q100_MSN001_ATA25-10-00_LC02_REQ_001").expect("parse");
        assert_eq!(id.serial_number(), "MSN001");
        assert_eq!(id.ata_chapter(), "25");
        assert_eq!(id.section(), "10");
        assert_eq!(id.subject(), "00");
        assert_eq!(id.lifecycle_phase(), LifecyclePhase::Lc02);
        assert_eq!(id.artifact_type(), "REQ");
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn test_parse_hyphenated_format() {
        let id = parse_identifier("AMPEL360-Q100-MSN042-ATA28-10-00-LC04-DES-123").expect("parse");
        assert_eq!(id.serial_number(), "MSN042");
        assert_eq!(id.ata_chapter(), "28");
        assert_eq!(id.lifecycle_phase(), LifecyclePhase::Lc04);
        assert_eq!(id.artifact_type(), "DES");
        assert_eq!(id.sequence(), 123);
    }

    #[test]
    fn test_parse_urn_format() {
        let id =
            parse_identifier("urn:ampel360:q100:msn001:ata71-11-00:lc06:tpr:003").expect("parse");
        assert_eq!(id.serial_number(), "MSN001");
        assert_eq!(id.ata_chapter(), "71");
        assert_eq!(id.section(), "11");
        assert_eq!(id.lifecycle_phase(), LifecyclePhase::Lc06);
        assert_eq!(id.artifact_type(), "TPR");
        assert_eq!(id.sequence(), 3);
    }

    #[test]
    fn test_hyphenated_type_in_every_format() {
        let id =
            parse_identifier("AMPEL360_Q100_MSN001_ATA25-10-00_LC02_REQ-TRC_001").expect("parse");
        assert_eq!(id.artifact_type(), "REQ-TRC");

        let hyphenated = id.to_hyphenated();
        assert_eq!(hyphenated, "AMPEL360-Q100-MSN001-ATA25-10-00-LC02-REQ-TRC-001");
        assert_eq!(parse_identifier(&hyphenated), Some(id.clone()));

        let urn = id.to_urn();
        assert_eq!(parse_identifier(&urn), Some(id));
    }

    #[test]
    fn test_unknown_prefix_is_malformed() {
        assert_eq!(check_identifier("INVALID_FORMAT_STRING"), ParseOutcome::Malformed);
        assert!(parse_identifier("").is_none());
    }

    #[test]
    fn test_known_prefix_wrong_shape_is_malformed() {
        assert_eq!(
            check_identifier("AMPEL360_Q100_MSN001_ATA25-10_LC02_REQ_001"),
            ParseOutcome::Malformed
        );
        // Fullwidth digits are not ASCII digits.
        let fullwidth = "AMPEL360_Q100_MSN001_ATA25-10-00_LC02_REQ_\u{ff10}\u{ff10}\u{ff11}";
        assert_eq!(check_identifier(fullwidth), ParseOutcome::Malformed);
        let arabic_indic = "urn:ampel360:q100:msn\u{660}\u{660}\u{661}:ata25-10-00:lc02:req:001";
        assert_eq!(check_identifier(arabic_indic), ParseOutcome::Malformed);
        // Mixed separators do not match either grammar.
        assert_eq!(
            check_identifier("AMPEL360_Q100-MSN001-ATA25-10-00-LC02-REQ-001"),
            ParseOutcome::Malformed
        );
    }

    #[test]
    fn test_well_shaped_but_invalid_is_reported_separately() {
        match check_identifier("AMPEL360_Q100_MSN001_ATA99-10-00_LC02_REQ_001") {
            ParseOutcome::Invalid(err) => assert_eq!(err.field(), IdField::AtaChapter),
            other => panic!("expected Invalid, got {other:?}"),
        }
        match check_identifier("AMPEL360_Q100_MSN001_ATA25-10-00_LC15_REQ_001") {
            ParseOutcome::Invalid(err) => assert_eq!(err.field(), IdField::LifecyclePhase),
            other => panic!("expected Invalid, got {other:?}"),
        }
        match check_identifier("AMPEL360_Q100_MSN001_ATA25-10-00_LC02_REQ_000") {
            ParseOutcome::Invalid(err) => assert_eq!(err.field(), IdField::Sequence),
            other => panic!("expected Invalid, got {other:?}"),
        }
        // Both failure kinds still collapse to None through parse().
        assert!(parse_identifier("AMPEL360_Q100_MSN001_ATA99-10-00_LC02_REQ_001").is_none());
    }

    #[test]
    fn test_urn_is_case_sensitive() {
        assert_eq!(
            check_identifier("urn:ampel360:q100:MSN001:ata25-10-00:lc02:req:001"),
            ParseOutcome::Malformed
        );
    }

    #[test]
    fn test_validate_identifier() {
        let (valid, error) = validate_identifier("AMPEL360_Q100_MSN001_ATA25-10-00_LC02_REQ_001");
        assert!(valid);
        assert!(error.is_none());

        let (valid, error) = validate_identifier("INVALID_FORMAT");
        assert!(!valid);
        assert!(error.is_some());
    }

    #[test]
    fn test_from_str() {
        let id: ArtifactId = "AMPEL360-Q100-MSN042-ATA28-10-00-LC04-DES-123"
            .parse()
            .expect("parse");
        assert_eq!(id.sequence(), 123);
        assert!("nonsense".parse::<ArtifactId>().is_err());
    }
}
