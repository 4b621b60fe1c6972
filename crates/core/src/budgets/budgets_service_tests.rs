//! Tests for BudgetService: loading, persisting and comparing budgets.

#[cfg(test)]
mod tests {
    use crate::budgets::{BudgetLineKind, BudgetService, BudgetServiceTrait};
    use crate::errors::{CalculatorError, Error};
    use crate::groups::{GroupItemKind, NewGroupItem};
    use crate::points::Point;
    use crate::projects::ProjectStatus;
    use crate::test_support::{blank_point, InMemoryStore};
    use crate::tension::TensionLevel;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(store: &Arc<InMemoryStore>) -> BudgetService {
        BudgetService::new(store.clone(), store.clone(), store.clone(), store.catalog())
    }

    /// One project with a pole and a medium tension cable on each of two points.
    fn seeded() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        store.seed_company("c1");
        store.seed_utility_pole("p11", "c1", 300, dec!(1000));
        store.seed_cable("cmt", "c1", TensionLevel::Medium, dec!(2.50));
        store.seed_connector("k1", "c1", dec!(3));
        store.seed_group(
            "gmt",
            "c1",
            TensionLevel::Medium,
            vec![NewGroupItem {
                kind: GroupItemKind::Connector,
                reference_id: Some("k1".to_string()),
                quantity: dec!(1),
                scales_with_phases: true,
            }],
        );
        store.seed_project("prj", "c1", 3, 1);
        for (id, sequence, span) in [("pt1", 1, dec!(50)), ("pt2", 2, dec!(30))] {
            store.seed_point(Point {
                span_length_m: span,
                utility_pole_id: Some("p11".to_string()),
                medium_tension_group_id: Some("gmt".to_string()),
                medium_tension_cable_id: Some("cmt".to_string()),
                ..blank_point(id, "prj", sequence)
            });
        }
        store
    }

    #[test]
    fn test_calculate_reads_project_points_and_catalog() {
        let store = seeded();
        let budget = service(&store).calculate_budget("prj").unwrap();

        assert_eq!(budget.point_count, 2);
        assert_eq!(budget.line(BudgetLineKind::UtilityPole, "p11").unwrap().quantity, dec!(2));
        assert_eq!(budget.line(BudgetLineKind::Cable, "cmt").unwrap().quantity, dec!(240));
        assert_eq!(budget.line(BudgetLineKind::Connector, "k1").unwrap().quantity, dec!(6));
        // 2000 + 600 + 18
        assert_eq!(budget.total, dec!(2618.00));
    }

    #[test]
    fn test_calculate_ignores_other_companies_catalog() {
        let store = seeded();
        store.seed_company("c2");
        store.seed_utility_pole("foreign", "c2", 300, dec!(1));
        store.seed_point(Point {
            utility_pole_id: Some("foreign".to_string()),
            ..blank_point("pt3", "prj", 3)
        });

        let err = service(&store).calculate_budget("prj").unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::MissingReference { ref id, .. }) if id == "foreign"
        ));
    }

    #[test]
    fn test_calculate_unknown_project() {
        let store = seeded();
        let err = service(&store).calculate_budget("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_budget_marks_draft_project_budgeted() {
        let store = seeded();
        let service = service(&store);

        let snapshot = service.save_budget("prj").await.unwrap();
        assert_eq!(snapshot.project_id, "prj");
        assert_eq!(snapshot.total, dec!(2618.00));
        assert_eq!(snapshot.lines.len(), 3);

        let project = store.projects.lock().unwrap()[0].clone();
        assert_eq!(project.status, ProjectStatus::Budgeted);

        assert_eq!(service.get_budget(&snapshot.id).unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_latest_budget_is_most_recent_save() {
        let store = seeded();
        let service = service(&store);

        assert!(service.get_latest_budget("prj").unwrap().is_none());

        let first = service.save_budget("prj").await.unwrap();
        store.points.lock().unwrap()[0].span_length_m = dec!(70);
        let second = service.save_budget("prj").await.unwrap();

        let latest = service.get_latest_budget("prj").unwrap().unwrap();
        assert_eq!(latest.id, second.id);

        let listed: Vec<String> = service
            .list_budgets("prj")
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(listed, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_archived_project_cannot_be_budgeted() {
        let store = seeded();
        store.projects.lock().unwrap()[0].status = ProjectStatus::Archived;

        let err = service(&store).save_budget("prj").await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert!(store.budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_calculation_saves_nothing() {
        let store = seeded();
        store.points.lock().unwrap()[1].utility_pole_id = Some("ghost".to_string());

        let err = service(&store).save_budget("prj").await.unwrap_err();
        assert!(matches!(err, Error::Calculation(_)));
        assert!(store.budgets.lock().unwrap().is_empty());
        assert_eq!(store.projects.lock().unwrap()[0].status, ProjectStatus::Draft);
    }

    #[tokio::test]
    async fn test_compare_reports_changed_lines_only() {
        let store = seeded();
        let service = service(&store);

        let before = service.save_budget("prj").await.unwrap();
        // Lengthen the first span by 10 m: 30 m more medium tension cable.
        store.points.lock().unwrap()[0].span_length_m = dec!(60);
        let after = service.save_budget("prj").await.unwrap();

        let comparison = service.compare_budgets(&before.id, &after.id).unwrap();
        assert_eq!(comparison.project_id, "prj");
        assert_eq!(comparison.base_budget_id, before.id);
        assert_eq!(comparison.other_budget_id, after.id);
        assert_eq!(comparison.lines.len(), 1);

        let delta = &comparison.lines[0];
        assert_eq!(delta.kind, BudgetLineKind::Cable);
        assert_eq!(delta.base_quantity, dec!(240));
        assert_eq!(delta.other_quantity, dec!(270));
        assert_eq!(delta.quantity_delta, dec!(30));
        assert_eq!(delta.total_delta, dec!(75.00));
        assert_eq!(comparison.total_delta, dec!(75.00));
    }

    #[tokio::test]
    async fn test_compare_reports_removed_lines() {
        let store = seeded();
        let service = service(&store);

        let before = service.save_budget("prj").await.unwrap();
        for point in store.points.lock().unwrap().iter_mut() {
            point.medium_tension_group_id = None;
        }
        let after = service.save_budget("prj").await.unwrap();

        let comparison = service.compare_budgets(&before.id, &after.id).unwrap();
        assert_eq!(comparison.lines.len(), 1);
        assert_eq!(comparison.lines[0].kind, BudgetLineKind::Connector);
        assert_eq!(comparison.lines[0].other_quantity, dec!(0));
        assert_eq!(comparison.total_delta, dec!(-18.00));
    }

    #[tokio::test]
    async fn test_compare_rejects_budgets_of_different_projects() {
        let store = seeded();
        store.seed_project("other", "c1", 1, 1);
        let service = service(&store);

        let a = service.save_budget("prj").await.unwrap();
        let b = service.save_budget("other").await.unwrap();

        let err = service.compare_budgets(&a.id, &b.id).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
