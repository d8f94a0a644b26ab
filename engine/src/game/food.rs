use super::session_rng::SessionRng;
use super::types::Point;

/// GitHub-themed collectibles, each with a fixed point value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Octocat,
    PullRequest,
    Issue,
    Fork,
    Star,
    Commit,
}

impl FoodKind {
    pub const ALL: [FoodKind; 6] = [
        FoodKind::Octocat,
        FoodKind::PullRequest,
        FoodKind::Issue,
        FoodKind::Fork,
        FoodKind::Star,
        FoodKind::Commit,
    ];

    pub fn points(&self) -> u32 {
        match self {
            FoodKind::Octocat => 5,
            FoodKind::PullRequest => 3,
            FoodKind::Issue => 2,
            FoodKind::Fork => 2,
            FoodKind::Star => 1,
            FoodKind::Commit => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodKind::Octocat => "octocat",
            FoodKind::PullRequest => "pull request",
            FoodKind::Issue => "issue",
            FoodKind::Fork => "fork",
            FoodKind::Star => "star",
            FoodKind::Commit => "commit",
        }
    }

    pub fn random(rng: &mut SessionRng) -> FoodKind {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Point,
    pub kind: FoodKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_values() {
        assert_eq!(FoodKind::Octocat.points(), 5);
        assert_eq!(FoodKind::PullRequest.points(), 3);
        assert_eq!(FoodKind::Issue.points(), 2);
        assert_eq!(FoodKind::Fork.points(), 2);
        assert_eq!(FoodKind::Star.points(), 1);
        assert_eq!(FoodKind::Commit.points(), 1);
    }

    #[test]
    fn test_random_kind_is_from_the_fixed_set() {
        let mut rng = SessionRng::new(7);
        for _ in 0..100 {
            let kind = FoodKind::random(&mut rng);
            assert!(FoodKind::ALL.contains(&kind));
        }
    }
}
