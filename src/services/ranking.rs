use crate::models::Resource;

/// A resource paired with its relevance score for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredResource<'a> {
    pub resource: &'a Resource,
    pub score: u32,
}

/// Keeps positive scores, orders them best first and truncates to `limit`.
///
/// The sort is stable, so equal scores keep the catalog's read order.
pub fn select_top<'a>(scored: Vec<ScoredResource<'a>>, limit: usize) -> Vec<ScoredResource<'a>> {
    let mut ranked: Vec<ScoredResource<'a>> = scored.into_iter().filter(|s| s.score > 0).collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NewResource, ResourceType};

    fn resources(n: usize) -> Vec<Resource> {
        (0..n)
            .map(|i| {
                Resource::new(NewResource {
                    title: format!("Resource {}", i),
                    slug: format!("resource-{}", i),
                    description: "Filler description.".to_string(),
                    resource_type: ResourceType::Video,
                    difficulty: Difficulty::Intermediate,
                    tags: vec!["filler".to_string()],
                    estimated_minutes: 10,
                })
            })
            .collect()
    }

    fn titles(selected: &[ScoredResource<'_>]) -> Vec<String> {
        selected.iter().map(|s| s.resource.title.clone()).collect()
    }

    #[test]
    fn test_orders_by_score_descending() {
        let all = resources(3);
        let scored = vec![
            ScoredResource { resource: &all[0], score: 1 },
            ScoredResource { resource: &all[1], score: 9 },
            ScoredResource { resource: &all[2], score: 4 },
        ];

        let selected = select_top(scored, 10);
        assert_eq!(titles(&selected), vec!["Resource 1", "Resource 2", "Resource 0"]);
    }

    #[test]
    fn test_excludes_zero_scores() {
        let all = resources(3);
        let scored = vec![
            ScoredResource { resource: &all[0], score: 0 },
            ScoredResource { resource: &all[1], score: 2 },
            ScoredResource { resource: &all[2], score: 0 },
        ];

        let selected = select_top(scored, 10);
        assert_eq!(selected.len(), 1);
        assert!(selected.iter().all(|s| s.score > 0));
    }

    #[test]
    fn test_truncates_to_limit() {
        let all = resources(6);
        let scored = all
            .iter()
            .map(|r| ScoredResource { resource: r, score: 3 })
            .collect();

        assert_eq!(select_top(scored, 4).len(), 4);
    }

    #[test]
    fn test_ties_keep_read_order() {
        let all = resources(4);
        let scored = vec![
            ScoredResource { resource: &all[0], score: 5 },
            ScoredResource { resource: &all[1], score: 8 },
            ScoredResource { resource: &all[2], score: 5 },
            ScoredResource { resource: &all[3], score: 8 },
        ];

        let selected = select_top(scored, 10);
        assert_eq!(
            titles(&selected),
            vec!["Resource 1", "Resource 3", "Resource 0", "Resource 2"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(select_top(Vec::new(), 5).is_empty());
    }
}
