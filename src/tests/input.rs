use super::{extract_headings, HeadingNode};
use crate::formats::markdown::MarkdownFormat;

#[test]
fn test_headings_carry_source_lines_and_levels() {
    let source = "# Title\n\nIntro\n\n## Part\n\ntext\n### Deep\n";
    let headings = extract_headings(source, &MarkdownFormat).unwrap();

    assert_eq!(
        headings,
        vec![
            HeadingNode {
                line: 0,
                level: 1,
                title: "Title".to_string()
            },
            HeadingNode {
                line: 4,
                level: 2,
                title: "Part".to_string()
            },
            HeadingNode {
                line: 7,
                level: 3,
                title: "Deep".to_string()
            },
        ]
    );
}

#[test]
fn test_fenced_code_hashes_are_not_headings() {
    let source = "# Real\n\n```sh\n# comment\n```\n";
    let headings = extract_headings(source, &MarkdownFormat).unwrap();

    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].line, 0);
}

#[test]
fn test_setext_headings_are_ignored() {
    let source = "Title\n=====\n\n## Atx\n";
    let headings = extract_headings(source, &MarkdownFormat).unwrap();

    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].title, "Atx");
}

#[test]
fn test_document_without_headings() {
    let headings = extract_headings("just text\n", &MarkdownFormat).unwrap();
    assert!(headings.is_empty());
}
