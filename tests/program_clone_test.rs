mod common;

use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use common::template_program_tree;
use ironcoach::services::program_service::plan_clone;

#[test]
fn clone_is_reparented_private_and_uninstalled() {
    let source = template_program_tree(Uuid::new_v4());
    let new_owner = Uuid::new_v4();
    let now = Utc::now();

    let clone = plan_clone(&source, new_owner, now);

    assert_ne!(clone.program.id, source.program.id);
    assert_eq!(clone.program.owner_id, new_owner);
    assert_eq!(clone.program.source_program_id, Some(source.program.id));
    assert!(!clone.program.is_public);
    assert!(!clone.program.is_template);
    assert_eq!(clone.program.install_count, 0);
    assert_eq!(clone.program.name, source.program.name);
}

#[test]
fn clone_preserves_structure_counts_and_relative_order() {
    let source = template_program_tree(Uuid::new_v4());
    let clone = plan_clone(&source, Uuid::new_v4(), Utc::now());

    assert_eq!(clone.versions.len(), source.versions.len());

    for (cloned_version, source_version) in clone.versions.iter().zip(&source.versions) {
        assert_eq!(
            cloned_version.version.position,
            source_version.version.position
        );
        assert_eq!(cloned_version.version.name, source_version.version.name);
        assert_eq!(cloned_version.days.len(), source_version.days.len());

        for (cloned_day, source_day) in cloned_version.days.iter().zip(&source_version.days) {
            assert_eq!(cloned_day.day.position, source_day.day.position);
            assert_eq!(cloned_day.day.name, source_day.day.name);
            assert_eq!(cloned_day.exercises.len(), source_day.exercises.len());

            for (cloned_exercise, source_exercise) in
                cloned_day.exercises.iter().zip(&source_day.exercises)
            {
                assert_eq!(cloned_exercise.position, source_exercise.position);
                assert_eq!(cloned_exercise.exercise, source_exercise.exercise);
                assert_eq!(cloned_exercise.target_sets, source_exercise.target_sets);
                assert_eq!(cloned_exercise.target_reps, source_exercise.target_reps);
            }
        }
    }
}

#[test]
fn clone_uses_fresh_ids_with_consistent_parent_links() {
    let source = template_program_tree(Uuid::new_v4());
    let clone = plan_clone(&source, Uuid::new_v4(), Utc::now());

    for (cloned_version, source_version) in clone.versions.iter().zip(&source.versions) {
        assert_ne!(cloned_version.version.id, source_version.version.id);
        assert_eq!(cloned_version.version.program_id, clone.program.id);

        for (cloned_day, source_day) in cloned_version.days.iter().zip(&source_version.days) {
            assert_ne!(cloned_day.day.id, source_day.day.id);
            assert_eq!(cloned_day.day.version_id, cloned_version.version.id);

            for (cloned_exercise, source_exercise) in
                cloned_day.exercises.iter().zip(&source_day.exercises)
            {
                assert_ne!(cloned_exercise.id, source_exercise.id);
                assert_eq!(cloned_exercise.day_id, cloned_day.day.id);
            }
        }
    }
}
