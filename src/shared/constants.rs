/// Origin tag stored when the submitter does not send one
pub const DEFAULT_SOURCE: &str = "Web";

/// Region label for reports without an address
pub const NO_REGION: &str = "No region";

/// Risk label for reports that were never classified
pub const UNCLASSIFIED_RISK: &str = "indefinido";

// =============================================================================
// AUDIT ACTORS
// =============================================================================

/// Role recorded on every status-change audit entry
pub const AGENT_ROLE: &str = "agent";

/// Actor used when a status change carries no agent
pub const SYSTEM_ACTOR_ID: &str = "system";
pub const SYSTEM_ACTOR_NAME: &str = "System";

// =============================================================================
// DASHBOARD
// =============================================================================

/// Regions shown in the dashboard region chart
pub const TOP_REGIONS_LIMIT: usize = 8;

/// Regions listed as hotspots
pub const HOTSPOTS_LIMIT: usize = 5;
