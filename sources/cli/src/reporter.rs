use analysis::ViolationReport;
use tracing::error;

/// Render a non-empty report, one class at a time. Classes and tags are
/// sorted so the output is stable run to run.
pub fn report(violations: &ViolationReport) {
    error!("duplicate tag values found:");

    let mut classes: Vec<_> = violations.classes().iter().collect();
    classes.sort_by_key(|(class_name, _)| class_name.as_str());

    for (class_name, tags) in classes {
        error!("class: {}", class_name);

        let mut tags: Vec<_> = tags.iter().collect();
        tags.sort_by_key(|(tag, _)| **tag);

        for (tag, field_info) in tags {
            error!("  tag {} conflicts:", tag);
            error!("    - {}", field_info);
        }

        error!("----------------------------------------");
    }
}
