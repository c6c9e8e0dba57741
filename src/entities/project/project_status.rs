use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum ProjectStatus {
    Pending,
    Assigned,
    Completed,
    Canceled,
}

/// Known raw spellings found across the client, freelancer and admin front ends.
/// Keys are compared after `normalize_raw`.
const STATUS_ALIASES: &[(&str, ProjectStatus)] = &[
    ("pending", ProjectStatus::Pending),
    ("open", ProjectStatus::Pending),
    ("waiting", ProjectStatus::Pending),
    ("new", ProjectStatus::Pending),
    ("menunggu", ProjectStatus::Pending),
    ("assigned", ProjectStatus::Assigned),
    ("process", ProjectStatus::Assigned),
    ("in process", ProjectStatus::Assigned),
    ("in progress", ProjectStatus::Assigned),
    ("inprogress", ProjectStatus::Assigned),
    ("ongoing", ProjectStatus::Assigned),
    ("proses", ProjectStatus::Assigned),
    ("diproses", ProjectStatus::Assigned),
    ("accepted", ProjectStatus::Assigned),
    ("completed", ProjectStatus::Completed),
    ("complete", ProjectStatus::Completed),
    ("done", ProjectStatus::Completed),
    ("finished", ProjectStatus::Completed),
    ("selesai", ProjectStatus::Completed),
    ("canceled", ProjectStatus::Canceled),
    ("cancelled", ProjectStatus::Canceled),
    ("cancel", ProjectStatus::Canceled),
    ("dibatalkan", ProjectStatus::Canceled),
    ("batal", ProjectStatus::Canceled),
];

fn normalize_raw(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Pending,
        ProjectStatus::Assigned,
        ProjectStatus::Completed,
        ProjectStatus::Canceled,
    ];

    /// Strict lookup for values coming from callers. Unknown spellings are `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let key = normalize_raw(raw);
        STATUS_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, status)| *status)
    }

    /// Lenient lookup for stored documents, falls back to `Pending`.
    pub fn from_stored(raw: &str) -> Self {
        Self::from_raw(raw).unwrap_or(ProjectStatus::Pending)
    }

    /// Lowercase spellings a stored document may carry for any of `statuses`,
    /// with `_` and `-` separator variants of multi-word aliases.
    pub fn stored_spellings(statuses: &[ProjectStatus]) -> Vec<String> {
        let mut spellings = vec![];
        for (alias, _) in STATUS_ALIASES
            .iter()
            .filter(|(_, status)| statuses.contains(status))
        {
            spellings.push(alias.to_string());
            if alias.contains(' ') {
                spellings.push(alias.replace(' ', "_"));
                spellings.push(alias.replace(' ', "-"));
            }
        }
        spellings
    }

    pub fn label_for(&self, role: ViewerRole) -> &'static str {
        match (self, role) {
            (ProjectStatus::Pending, ViewerRole::Client) => "Waiting for Freelancer",
            (ProjectStatus::Pending, ViewerRole::Freelancer) => "Open",
            (ProjectStatus::Pending, ViewerRole::Admin) => "Pending",
            (ProjectStatus::Assigned, ViewerRole::Admin) => "Assigned",
            (ProjectStatus::Assigned, _) => "In Progress",
            (ProjectStatus::Completed, _) => "Completed",
            (ProjectStatus::Canceled, _) => "Canceled",
        }
    }

    /// Explicit transition table used by the strict policy.
    pub fn can_transition_to(&self, to: ProjectStatus) -> bool {
        if *self == to {
            return true;
        }
        matches!(
            (self, to),
            (ProjectStatus::Pending, ProjectStatus::Assigned)
                | (ProjectStatus::Pending, ProjectStatus::Canceled)
                | (ProjectStatus::Assigned, ProjectStatus::Pending)
                | (ProjectStatus::Assigned, ProjectStatus::Completed)
                | (ProjectStatus::Assigned, ProjectStatus::Canceled)
        )
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: String = Deserialize::deserialize(deserializer)?;
        Ok(ProjectStatus::from_stored(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    Client,
    Freelancer,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    /// Source statuses a conditional update may start from to reach `to`.
    /// `None` means the update is not guarded on status.
    pub fn allowed_sources(&self, to: ProjectStatus) -> Option<Vec<ProjectStatus>> {
        match self {
            TransitionPolicy::Permissive => None,
            TransitionPolicy::Strict => Some(
                ProjectStatus::ALL
                    .into_iter()
                    .filter(|from| from.can_transition_to(to))
                    .collect(),
            ),
        }
    }

    /// Guard for progress-only updates.
    pub fn progress_sources(&self) -> Option<Vec<ProjectStatus>> {
        match self {
            TransitionPolicy::Permissive => None,
            TransitionPolicy::Strict => Some(vec![ProjectStatus::Assigned]),
        }
    }

    /// Guard for rating a project.
    pub fn rating_sources(&self) -> Option<Vec<ProjectStatus>> {
        match self {
            TransitionPolicy::Permissive => None,
            TransitionPolicy::Strict => Some(vec![ProjectStatus::Completed]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_raw_spellings_to_canonical() {
        assert_eq!(ProjectStatus::from_raw("PENDING"), Some(ProjectStatus::Pending));
        assert_eq!(ProjectStatus::from_raw(" in_progress "), Some(ProjectStatus::Assigned));
        assert_eq!(ProjectStatus::from_raw("In-Progress"), Some(ProjectStatus::Assigned));
        assert_eq!(ProjectStatus::from_raw("process"), Some(ProjectStatus::Assigned));
        assert_eq!(ProjectStatus::from_raw("Selesai"), Some(ProjectStatus::Completed));
        assert_eq!(ProjectStatus::from_raw("cancelled"), Some(ProjectStatus::Canceled));
        assert_eq!(ProjectStatus::from_raw("archived"), None);
    }

    #[test]
    fn stored_values_fall_back_to_pending() {
        assert_eq!(ProjectStatus::from_stored("archived"), ProjectStatus::Pending);
        assert_eq!(ProjectStatus::from_stored(""), ProjectStatus::Pending);
        let status: ProjectStatus = serde_json::from_str("\"Done\"").unwrap();
        assert_eq!(status, ProjectStatus::Completed);
    }

    #[test]
    fn stored_spellings_cover_separator_variants() {
        let spellings = ProjectStatus::stored_spellings(&[ProjectStatus::Assigned]);
        assert!(spellings.contains(&"assigned".to_string()));
        assert!(spellings.contains(&"in_progress".to_string()));
        assert!(spellings.contains(&"in-process".to_string()));
        assert!(!spellings.contains(&"selesai".to_string()));
        for spelling in &spellings {
            assert_eq!(ProjectStatus::from_raw(spelling), Some(ProjectStatus::Assigned));
        }
    }

    #[test]
    fn labels_depend_on_viewer() {
        let pending = ProjectStatus::Pending;
        assert_eq!(pending.label_for(ViewerRole::Client), "Waiting for Freelancer");
        assert_eq!(pending.label_for(ViewerRole::Freelancer), "Open");
        assert_eq!(pending.label_for(ViewerRole::Admin), "Pending");
        assert_eq!(ProjectStatus::Assigned.label_for(ViewerRole::Client), "In Progress");
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in ProjectStatus::ALL {
            if to != ProjectStatus::Completed {
                assert!(!ProjectStatus::Completed.can_transition_to(to));
            }
            if to != ProjectStatus::Canceled {
                assert!(!ProjectStatus::Canceled.can_transition_to(to));
            }
        }
    }

    #[test]
    fn strict_sources_follow_table() {
        let sources = TransitionPolicy::Strict
            .allowed_sources(ProjectStatus::Completed)
            .unwrap();
        assert_eq!(sources, vec![ProjectStatus::Assigned, ProjectStatus::Completed]);
        assert!(TransitionPolicy::Permissive
            .allowed_sources(ProjectStatus::Completed)
            .is_none());
    }

    #[test]
    fn policy_parses_from_config_string() {
        assert_eq!("strict".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Strict);
        assert_eq!("Permissive".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Permissive);
        assert!("loose".parse::<TransitionPolicy>().is_err());
    }
}
