//! Requirement string formatting.

use crate::distribution::metadata::Distribution;

/// Convert a distribution into a requirement string.
///
/// An ordinary install becomes a pinned `name==version`. A distribution
/// installed from a version-control source becomes `vcs+url`, suffixed
/// with `#subdirectory=path` when the install recorded a sub-path.
pub fn format_requirement(dist: &Distribution) -> String {
    if let Some(direct) = &dist.direct_url {
        if let Some(vcs) = &direct.vcs_info {
            let mut requirement = format!("{}+{}", vcs.vcs, direct.url);
            if let Some(subdirectory) = &direct.subdirectory {
                requirement.push_str("#subdirectory=");
                requirement.push_str(subdirectory);
            }
            return requirement;
        }
    }
    format!("{}=={}", dist.name, dist.version)
}
