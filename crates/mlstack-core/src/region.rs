//! Ambient deployment region resolution

use crate::{MlstackError, MlstackResult};

/// Environment variables consulted for the region, in order
pub const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Resolve the deployment region from the process environment.
///
/// Precedence: `explicit`, then `AWS_REGION`, then `AWS_DEFAULT_REGION`,
/// then `configured`.
pub fn resolve_region(explicit: Option<&str>, configured: Option<&str>) -> MlstackResult<String> {
    resolve_region_with(|key| std::env::var(key).ok(), explicit, configured)
}

/// Same as [`resolve_region`] with a caller-supplied environment lookup
pub fn resolve_region_with<F>(
    lookup: F,
    explicit: Option<&str>,
    configured: Option<&str>,
) -> MlstackResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = REGION_ENV_VARS.iter().filter_map(|key| lookup(key));

    explicit
        .map(str::to_string)
        .into_iter()
        .chain(from_env)
        .chain(configured.map(str::to_string))
        .map(|region| region.trim().to_string())
        .find(|region| !region.is_empty())
        .ok_or_else(|| {
            MlstackError::Region(
                "no region given; pass --region, set AWS_REGION, or set deployment.region"
                    .to_string(),
            )
        })
}
