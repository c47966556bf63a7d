// Grid read paths: the weekly matrix for one section, professor or room, and the
// printable document of a section's week.
//
// Every call rebuilds from the latest assignment list. Nothing is cached between calls.
// Conflicts are evaluated against every class sharing a resource with the listed ones,
// not only against the listed ones: a section grid must show a room clash with another
// section.

use crate::application::errors::ApplicationError;
use crate::core::ports::{AssignmentRepository, RepositoryError};
use crate::core::schedule::assignment::Assignment;
use crate::core::schedule::config::ScheduleConfig;
use crate::core::schedule::conflicts::annotate_conflicts;
use crate::core::schedule::export::{DocumentFormat, ExportHeader, export_grid};
use crate::core::schedule::grid::{GridMatrix, build_grid};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridScope {
    Section,
    Professor,
    Room,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ScheduleGridQueries<TRepository>
where
    TRepository: AssignmentRepository + 'static,
{
    repository: Arc<TRepository>,
    config: ScheduleConfig,
}

impl<TRepository> ScheduleGridQueries<TRepository>
where
    TRepository: AssignmentRepository + 'static,
{
    pub fn new(repository: Arc<TRepository>, config: ScheduleConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    #[tracing::instrument(skip(self))]
    pub async fn grid(&self, scope: GridScope, id: &str) -> Result<GridMatrix, ApplicationError> {
        let assignments = match scope {
            GridScope::Section => self.repository.list_by_section(id).await?,
            GridScope::Professor => self.repository.list_by_professor(id).await?,
            GridScope::Room => self.repository.list_by_room(id).await?,
        };
        let annotated = self.with_conflicts(assignments).await?;
        Ok(build_grid(
            &annotated,
            &self.config.shift,
            self.config.interval_minutes,
            &self.config.days,
        ))
    }

    async fn with_conflicts(
        &self,
        listed: Vec<Assignment>,
    ) -> Result<Vec<Assignment>, RepositoryError> {
        let listed_count = listed.len();
        let mut seen: BTreeSet<String> = listed.iter().filter_map(|a| a.id.clone()).collect();
        let resource_ids = |field: fn(&Assignment) -> &String| -> BTreeSet<String> {
            listed
                .iter()
                .map(field)
                .filter(|id| !id.is_empty())
                .cloned()
                .collect()
        };
        let sections = resource_ids(|a| &a.section_id);
        let professors = resource_ids(|a| &a.professor_id);
        let rooms = resource_ids(|a| &a.room_id);

        let mut pool = listed;
        for id in &sections {
            pool.extend(self.repository.list_by_section(id).await?);
        }
        for id in &professors {
            pool.extend(self.repository.list_by_professor(id).await?);
        }
        for id in &rooms {
            pool.extend(self.repository.list_by_room(id).await?);
        }
        let mut index = 0;
        pool.retain(|assignment| {
            index += 1;
            index <= listed_count
                || assignment
                    .id
                    .as_ref()
                    .is_none_or(|id| seen.insert(id.clone()))
        });

        // the listed assignments stay in front, in their original order
        let mut annotated = annotate_conflicts(pool);
        annotated.truncate(listed_count);
        Ok(annotated)
    }

    #[tracing::instrument(skip(self, header))]
    pub async fn export(
        &self,
        section_id: &str,
        header: &ExportHeader,
        format: DocumentFormat,
    ) -> Result<ExportedFile, ApplicationError> {
        let matrix = self.grid(GridScope::Section, section_id).await?;
        let document = export_grid(&matrix, header);
        let bytes = document.render(format)?;
        let file_name = header.file_name(format);
        info!(%file_name, rows = document.rows.len(), "schedule exported");
        Ok(ExportedFile {
            file_name,
            content_type: format.content_type(),
            bytes,
        })
    }
}

#[cfg(test)]
mod schedule_grid_queries_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_assignment_repository::InMemoryAssignmentRepository;
    use crate::core::schedule::assignment::DayOfWeek;
    use crate::core::schedule::config::ShiftWindow;
    use crate::core::schedule::grid::GridCell;
    use crate::core::schedule::quantizer::TimeBucket;
    use crate::test_support::fixtures::assignments::{AssignmentBuilder, clock};
    use rstest::{fixture, rstest};

    type Queries = ScheduleGridQueries<InMemoryAssignmentRepository>;

    /// Monday and Tuesday, 07:00-09:00 at 45 minutes: buckets 700, 745 and 830.
    /// Section S-1 has Calculus I on Monday 07:00-08:30 and a room clash at 07:30 from S-2.
    #[fixture]
    async fn queries() -> Queries {
        let config = ScheduleConfig {
            shift: ShiftWindow::new(clock(7, 0), clock(9, 0)).unwrap(),
            days: vec![DayOfWeek::Monday, DayOfWeek::Tuesday],
            ..ScheduleConfig::default()
        };
        let repository = InMemoryAssignmentRepository::new(config.clone());
        repository
            .insert(AssignmentBuilder::new().id("a-1").build())
            .await
            .unwrap();
        repository
            .insert(
                AssignmentBuilder::new()
                    .id("a-2")
                    .professor("P-2", "Prof. Díaz")
                    .section("S-2")
                    .start_time(clock(7, 30))
                    .end_time(clock(8, 0))
                    .build(),
            )
            .await
            .unwrap();
        ScheduleGridQueries::new(Arc::new(repository), config)
    }

    #[fixture]
    fn header() -> ExportHeader {
        ExportHeader {
            program_code: "ISC".into(),
            program_name: "Computer Systems Engineering".into(),
            track_label: "Morning".into(),
            section_label: "1A".into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_build_the_section_grid(#[future] queries: Queries) {
        let matrix = queries.await.grid(GridScope::Section, "S-1").await.unwrap();
        assert_eq!(
            matrix.buckets(),
            &[
                TimeBucket::from_minutes(420),
                TimeBucket::from_minutes(465),
                TimeBucket::from_minutes(510)
            ]
        );
        match matrix.cell_at(DayOfWeek::Monday, 0) {
            Some(GridCell::OccupiedStart { span_buckets, .. }) => assert_eq!(*span_buckets, 2),
            other => panic!("expected a start cell, got {other:?}"),
        }
        assert_eq!(
            matrix.cell_at(DayOfWeek::Monday, 1),
            Some(&GridCell::OccupiedContinuation)
        );
        assert_eq!(matrix.cell_at(DayOfWeek::Monday, 2), Some(&GridCell::Empty));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_annotate_conflicts_across_the_room_grid(#[future] queries: Queries) {
        let matrix = queries.await.grid(GridScope::Room, "R-1").await.unwrap();
        let placed: Vec<_> = matrix.placed().collect();
        // a-2 snaps onto bucket 700 after a-1 and overwrites it
        assert_eq!(placed.len(), 1);
        let (_, _, assignment) = placed[0];
        assert_eq!(assignment.id.as_deref(), Some("a-2"));
        assert_eq!(assignment.conflicts.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_export_the_section_as_html(#[future] queries: Queries, header: ExportHeader) {
        let file = queries
            .await
            .export("S-1", &header, DocumentFormat::Html)
            .await
            .unwrap();
        assert_eq!(file.file_name, "HorarioISC-Morning-1A.html");
        assert_eq!(file.content_type, "text/html; charset=utf-8");
        let html = String::from_utf8(file.bytes).unwrap();
        assert!(html.contains("rowspan=\"2\""));
        assert!(html.contains("Computer Systems Engineering - Morning - 1A"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_export_the_section_as_csv(#[future] queries: Queries, header: ExportHeader) {
        let file = queries
            .await
            .export("S-1", &header, DocumentFormat::Csv)
            .await
            .unwrap();
        assert_eq!(file.file_name, "HorarioISC-Morning-1A.csv");
        let csv = String::from_utf8(file.bytes).unwrap();
        // banner, header and three bucket rows
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.lines().nth(1).unwrap().starts_with("Time,Monday,Tuesday"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_every_row_when_a_shorter_class_shares_a_start(header: ExportHeader) {
        let config = ScheduleConfig {
            shift: ShiftWindow::new(clock(7, 0), clock(9, 0)).unwrap(),
            days: vec![DayOfWeek::Monday],
            ..ScheduleConfig::default()
        };
        let repository = InMemoryAssignmentRepository::new(config.clone());
        repository
            .insert(AssignmentBuilder::new().id("a-1").build())
            .await
            .unwrap();
        repository
            .insert(
                AssignmentBuilder::new()
                    .id("a-2")
                    .course("c-2", "Physics I")
                    .end_time(clock(7, 45))
                    .build(),
            )
            .await
            .unwrap();
        let queries = ScheduleGridQueries::new(Arc::new(repository), config);

        let matrix = queries.grid(GridScope::Section, "S-1").await.unwrap();
        assert_eq!(matrix.cell_at(DayOfWeek::Monday, 1), Some(&GridCell::Empty));

        let file = queries
            .export("S-1", &header, DocumentFormat::Csv)
            .await
            .unwrap();
        let csv = String::from_utf8(file.bytes).unwrap();
        assert_eq!(csv.lines().count(), 5);
    }
}
