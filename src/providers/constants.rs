/// Default wait for DNS changes to propagate, in seconds.
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 120;
