//! Observability tests for the stateful registries.
//!
//! Captured output is filtered to this test crate, so these check that the
//! emitters and the instrumented operations run cleanly under a subscriber.
//! Field-level assertions live in the unit tests of `ampel_ids::obs`.

use ampel_ids::{
    emit_identifier_generated, emit_link_recorded, emit_link_rejected, emit_sequence_reset,
    ArtifactId, IdGenerator, LinkageRegistry, RegistrySpan, SequenceKey,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_emit_identifier_generated() {
    let id = ArtifactId::new("MSN001", "25", "10", "00", "LC02", "REQ", 1).expect("valid");
    emit_identifier_generated("obs", &id, false);
}

#[traced_test]
#[test]
fn test_emit_sequence_reset() {
    emit_sequence_reset("obs", "MSN001/ATA25-10-00/LC02/REQ");
}

#[traced_test]
#[test]
fn test_emit_link_events() {
    emit_link_recorded("obs", "PBS-TA-ATA25-10-00-SEAT_ASSY", "WBS-DES-1", true);
    emit_link_rejected("obs", "PBS-XA", &"unparseable PBS ID");
}

#[traced_test]
#[test]
fn test_registry_span_wraps_operations() {
    let _span = RegistrySpan::enter("msn001");

    let mut ids = IdGenerator::named("msn001");
    let key = SequenceKey::new("MSN001", "28", "10", "00", "LC04", "DES");
    let id = ids.generate(&key, None).expect("generate");
    assert_eq!(id.sequence(), 1);
    ids.reset_sequence(&key);

    let mut links = LinkageRegistry::new("msn001");
    links
        .link("PBS-TC2-ATA28-10-00-CRYO_TANK_FWD", "WBS-DES-2.3.1")
        .expect("link");
    assert!(links.link("PBS-TC2-ATA28-10-00-CRYO_TANK_FWD", "WBS-ZZZ-1").is_err());
}
