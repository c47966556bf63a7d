// Read paths returning raw assignment lists and availability candidates.
//
// Purpose
// - Expose the listing operations of the orchestrator for grid consumers.
// - Pass availability searches through to the collaborator that owns them.

use crate::application::errors::ApplicationError;
use crate::core::ports::{
    AssignmentRepository, AvailabilitySearch, ProfessorCandidate, RoomCandidate,
};
use crate::core::schedule::assignment::Assignment;
use std::sync::Arc;

pub struct AssignmentQueries<TRepository, TSearch>
where
    TRepository: AssignmentRepository + 'static,
    TSearch: AvailabilitySearch + 'static,
{
    repository: Arc<TRepository>,
    search: Arc<TSearch>,
}

impl<TRepository, TSearch> AssignmentQueries<TRepository, TSearch>
where
    TRepository: AssignmentRepository + 'static,
    TSearch: AvailabilitySearch + 'static,
{
    pub fn new(repository: Arc<TRepository>, search: Arc<TSearch>) -> Self {
        Self { repository, search }
    }

    pub async fn list_by_professor(
        &self,
        professor_id: &str,
    ) -> Result<Vec<Assignment>, ApplicationError> {
        Ok(self.repository.list_by_professor(professor_id).await?)
    }

    pub async fn list_by_section(
        &self,
        section_id: &str,
    ) -> Result<Vec<Assignment>, ApplicationError> {
        Ok(self.repository.list_by_section(section_id).await?)
    }

    pub async fn list_by_room(&self, room_id: &str) -> Result<Vec<Assignment>, ApplicationError> {
        Ok(self.repository.list_by_room(room_id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_available_professors(
        &self,
        section_id: &str,
        needed_minutes: u32,
    ) -> Result<Vec<ProfessorCandidate>, ApplicationError> {
        Ok(self
            .search
            .find_available_professors(section_id, needed_minutes)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_available_rooms(
        &self,
        section_id: &str,
        professor_id: &str,
        needed_minutes: u32,
    ) -> Result<Vec<RoomCandidate>, ApplicationError> {
        Ok(self
            .search
            .find_available_rooms(section_id, professor_id, needed_minutes)
            .await?)
    }
}

#[cfg(test)]
mod assignment_queries_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_assignment_repository::InMemoryAssignmentRepository;
    use crate::core::schedule::config::ScheduleConfig;
    use crate::test_support::fixtures::assignments::AssignmentBuilder;
    use rstest::{fixture, rstest};

    type Queries = AssignmentQueries<InMemoryAssignmentRepository, InMemoryAssignmentRepository>;

    #[fixture]
    async fn queries() -> Queries {
        let repository = InMemoryAssignmentRepository::new(ScheduleConfig::default())
            .with_catalog(
                vec![ProfessorCandidate {
                    professor_id: "P-2".into(),
                    professor_name: "Prof. Díaz".into(),
                }],
                vec![RoomCandidate {
                    room_id: "R-2".into(),
                    room_code: "B-202".into(),
                }],
            );
        repository
            .insert(AssignmentBuilder::new().id("a-1").build())
            .await
            .unwrap();
        let repository = Arc::new(repository);
        AssignmentQueries::new(repository.clone(), repository)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_raw_assignments_per_resource(#[future] queries: Queries) {
        let queries = queries.await;
        assert_eq!(queries.list_by_section("S-1").await.unwrap().len(), 1);
        assert_eq!(queries.list_by_professor("P-1").await.unwrap().len(), 1);
        assert_eq!(queries.list_by_room("R-1").await.unwrap().len(), 1);
        assert!(queries.list_by_room("R-2").await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_pass_availability_candidates_through(#[future] queries: Queries) {
        let queries = queries.await;
        let professors = queries.find_available_professors("S-1", 90).await.unwrap();
        assert_eq!(professors[0].professor_id, "P-2");
        let rooms = queries.find_available_rooms("S-1", "P-2", 90).await.unwrap();
        assert_eq!(rooms[0].room_code, "B-202");
    }
}
