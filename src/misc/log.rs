/*!
Miscellaneous items related to [logging](log).

The substitution engine, the unifier and the normalization passes call the
[log] macros with one of the targets below, so output can be filtered per
component (for example `RUST_LOG=unification=trace` with `env_logger`).

No log implementation is provided by this crate.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [substitutions](crate::unify::Substitution)
    pub const SUBSTITUTION: &str = "substitution";

    /// Logs related to [unification](crate::unify::unify)
    pub const UNIFICATION: &str = "unification";

    /// Logs related to [normalization](crate::normalize)
    pub const NORMALIZATION: &str = "normalization";
}
