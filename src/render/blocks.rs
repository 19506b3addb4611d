//! `<Block>`/`<Prose>` page sections.

use crate::parser::DatasetRecord;

const SUMMARY_ATTRIBUTES: &[(&str, &str)] = &[
    ("Temporal Resolution", "temporal_resolution"),
    ("Spatial Extent", "spatial_extent"),
    ("Spatial Resolution", "spatial_resolution"),
    ("Data Type", "data_type"),
    ("Data Latency", "data_latency"),
];

/// Dataset summary shown right below the frontmatter.
pub fn summary_block(dataset: &DatasetRecord) -> String {
    let mut lines = vec![format!(
        "    **Temporal Extent:** {}<br />",
        dataset.temporal_extent()
    )];
    lines.extend(
        SUMMARY_ATTRIBUTES
            .iter()
            .map(|(label, key)| format!("    **{}:** {}<br />", label, dataset.display(key))),
    );
    wrap(&lines.join("\n"))
}

/// One narrative section. Body lines are trimmed, indented and separated by
/// blank lines; empty lines are dropped.
pub fn prose_block(header: &str, body: &str, titled: bool) -> String {
    let paragraphs = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n\n");

    if titled {
        wrap(&format!("    ## {}\n{}", header, paragraphs))
    } else {
        wrap(&paragraphs)
    }
}

fn wrap(inner: &str) -> String {
    format!("<Block>\n  <Prose>\n{}\n  </Prose>\n</Block>\n\n", inner)
}
