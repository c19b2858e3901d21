// src/domain/post/status.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a post. The set of legal transitions is fixed by
/// [`PostStatus::allows_transition`]; every other edge is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Scheduled,
    Archived,
}

impl PostStatus {
    pub const ALL: [Self; 4] = [
        Self::Draft,
        Self::Published,
        Self::Scheduled,
        Self::Archived,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
            Self::Archived => "archived",
        }
    }

    /// Legal edges of the status graph. Self-edges are not part of the graph;
    /// callers treat a same-status request as a no-op refresh instead.
    #[must_use]
    pub const fn allows_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::Published | Self::Scheduled | Self::Archived)
                | (Self::Published, Self::Draft | Self::Archived)
                | (Self::Scheduled, Self::Draft | Self::Published | Self::Archived)
                | (Self::Archived, Self::Draft)
        )
    }

    pub fn ensure_transition(self, to: Self) -> DomainResult<()> {
        if self.allows_transition(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { from: self, to })
        }
    }

    /// Eligibility for the set-based publish operation.
    #[must_use]
    pub const fn batch_publishable(self) -> bool {
        matches!(self, Self::Draft | Self::Scheduled)
    }

    /// Eligibility for the set-based archive operation.
    #[must_use]
    pub const fn batch_archivable(self) -> bool {
        matches!(self, Self::Draft | Self::Published | Self::Scheduled)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "scheduled" => Ok(Self::Scheduled),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::Validation(format!(
                "unknown post status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use PostStatus::{Archived, Draft, Published, Scheduled};

    const LEGAL: [(PostStatus, PostStatus); 9] = [
        (Draft, Published),
        (Draft, Scheduled),
        (Draft, Archived),
        (Published, Draft),
        (Published, Archived),
        (Scheduled, Draft),
        (Scheduled, Published),
        (Scheduled, Archived),
        (Archived, Draft),
    ];

    #[test]
    fn transition_table_is_exact() {
        for from in PostStatus::ALL {
            for to in PostStatus::ALL {
                if from == to {
                    continue;
                }
                let expected = LEGAL.contains(&(from, to));
                assert_eq!(
                    from.allows_transition(to),
                    expected,
                    "unexpected verdict for {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn self_edges_are_not_part_of_the_graph() {
        for status in PostStatus::ALL {
            assert!(!status.allows_transition(status));
        }
    }

    #[test]
    fn ensure_transition_names_the_pair() {
        let err = Archived.ensure_transition(Published).unwrap_err();
        match err {
            DomainError::InvalidTransition { from, to } => {
                assert_eq!(from, Archived);
                assert_eq!(to, Published);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn parse_and_display_round_trip() {
        for status in PostStatus::ALL {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
        assert!("deleted".parse::<PostStatus>().is_err());
    }

    #[test]
    fn batch_eligibility() {
        assert!(Draft.batch_publishable());
        assert!(Scheduled.batch_publishable());
        assert!(!Published.batch_publishable());
        assert!(!Archived.batch_publishable());

        assert!(Draft.batch_archivable());
        assert!(Published.batch_archivable());
        assert!(Scheduled.batch_archivable());
        assert!(!Archived.batch_archivable());
    }
}
