// Loads the assignments that can clash with a candidate.
//
// A candidate can only conflict with classes sharing its section, professor or room, so
// the three lists are merged and deduplicated by id. Unsaved rows are kept as they are.

use crate::core::ports::{AssignmentRepository, RepositoryError};
use crate::core::schedule::assignment::Assignment;
use std::collections::BTreeSet;

pub async fn load_related(
    repository: &impl AssignmentRepository,
    candidate: &Assignment,
) -> Result<Vec<Assignment>, RepositoryError> {
    let by_section = repository.list_by_section(&candidate.section_id).await?;
    let by_professor = repository
        .list_by_professor(&candidate.professor_id)
        .await?;
    let by_room = repository.list_by_room(&candidate.room_id).await?;

    let mut seen = BTreeSet::new();
    Ok(by_section
        .into_iter()
        .chain(by_professor)
        .chain(by_room)
        .filter(|assignment| match &assignment.id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect())
}

#[cfg(test)]
mod related_assignments_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_assignment_repository::InMemoryAssignmentRepository;
    use crate::core::schedule::config::ScheduleConfig;
    use crate::test_support::fixtures::assignments::AssignmentBuilder;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_merge_the_three_resource_lists_without_duplicates() {
        let repository = InMemoryAssignmentRepository::new(ScheduleConfig::default());
        // shares section, professor and room with the candidate
        repository
            .insert(AssignmentBuilder::new().id("a").build())
            .await
            .unwrap();
        // shares only the room
        repository
            .insert(
                AssignmentBuilder::new()
                    .id("b")
                    .professor("P-2", "Prof. Díaz")
                    .section("S-2")
                    .build(),
            )
            .await
            .unwrap();
        // shares nothing
        repository
            .insert(
                AssignmentBuilder::new()
                    .id("c")
                    .professor("P-3", "Prof. Ruiz")
                    .room("R-3", "C-303")
                    .section("S-3")
                    .build(),
            )
            .await
            .unwrap();

        let candidate = AssignmentBuilder::new().build();
        let related = load_related(&repository, &candidate).await.unwrap();
        let mut ids: Vec<String> = related.into_iter().filter_map(|a| a.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
