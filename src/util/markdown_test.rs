use super::render_markdown_html;

#[test]
fn renders_citation_footer_emphasis() {
    let html = render_markdown_html("Breathe.\n\n📚 *Based on: Guide A, Guide B*");
    assert!(html.contains("<em>Based on: Guide A, Guide B</em>"));
}

#[test]
fn strips_raw_html() {
    let html = render_markdown_html("hi <script>alert(1)</script>");
    assert!(!html.contains("<script>"));
}

#[test]
fn keeps_single_line_breaks() {
    let html = render_markdown_html("one\ntwo");
    assert!(html.contains("<br"));
}
