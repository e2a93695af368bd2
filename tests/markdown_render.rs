//! End-to-end Markdown rendering from docutils XML.

use docnb::markdown::{FenceStyle, WarnScope};
use docnb::{Document, Error, MarkdownRenderer, RenderConfig, parse_docutils_xml};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> String {
    format!("{}/{}", FIXTURES_DIR, name)
}

fn render(xml: &str) -> String {
    let doc = parse_docutils_xml(xml).expect("Failed to parse XML");
    MarkdownRenderer::new().unwrap().render(&doc).unwrap()
}

#[test]
fn test_tutorial_fixture() {
    let doc = Document::open(fixture_path("tutorial.xml")).expect("Failed to load fixture");
    let mut renderer = MarkdownRenderer::new().unwrap();
    let text = renderer.render(&doc).unwrap();

    assert_eq!(
        text,
        "# Plotting tutorial\n\
         \n\
         This tutorial uses [NumPy](https://numpy.org) and *matplotlib*.\n\
         \n\
         ## Setup\n\
         \n\
         You need:\n\
         \n\
         * Python 3\n\
         * `numpy`\n\
         * `matplotlib`\n\
         \n\
         ## Plotting\n\
         \n\
         > Plots are **worth** a thousand words.\n\
         \n\
         ```python\n\
         def square(x):\n    return x * x\n\
         ```\n\
         \n\
         \n\
         ---\n\
         \n\
         Done.\n"
    );

    let info = renderer.docinfo();
    assert_eq!(info.title, "Plotting tutorial");
    assert_eq!(info.subtitle, "A short guide");
    assert_eq!(info.authors, vec!["Ada Lovelace"]);
    assert_eq!(info.version, "0.3");
}

#[test]
fn test_tutorial_warnings_once_per_kind() {
    let doc = Document::open(fixture_path("tutorial.xml")).unwrap();
    let mut renderer = MarkdownRenderer::new().unwrap();
    renderer.render(&doc).unwrap();

    // the fixture holds two tables; only one warning for them
    assert_eq!(
        renderer.warnings(),
        [
            "The mpl_hint element is not supported.",
            "The doctest_block element is not supported.",
            "The nbplot_rendered element is not supported.",
            "The nbplot_not_rendered element is not supported.",
            "The table element is not supported.",
        ]
    );
}

#[test]
fn test_fresh_renderers_are_identical() {
    let doc = Document::open(fixture_path("tutorial.xml")).unwrap();
    let first = MarkdownRenderer::new().unwrap().render(&doc).unwrap();
    let second = MarkdownRenderer::new().unwrap().render(&doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reused_renderer_resets_state() {
    let mut renderer = MarkdownRenderer::new().unwrap();
    let a = parse_docutils_xml("<document><title>A</title><paragraph>one</paragraph></document>")
        .unwrap();
    let b = parse_docutils_xml("<document><paragraph>two</paragraph></document>").unwrap();

    assert_eq!(renderer.render(&a).unwrap(), "# A\n\none\n");
    assert_eq!(renderer.render(&b).unwrap(), "two\n");
    assert_eq!(renderer.docinfo().title, "");
}

#[test]
fn test_nodes_before_title_render_below_heading() {
    let text = render(
        "<document>\
           <comment xml:space=\"preserve\">generated</comment>\
           <title>Guide</title>\
           <paragraph>Body.</paragraph>\
         </document>",
    );
    assert_eq!(text, "# Guide\n\n<!-- generated -->\nBody.\n");

    let text = render(
        "<document>\
           <system_message level=\"1\" source=\"a.rst\" type=\"INFO\">\
             <paragraph>note</paragraph>\
           </system_message>\
           <title>Guide</title>\
         </document>",
    );
    assert_eq!(
        text,
        "# Guide\n\n\"System Message: INFO/1 (a.rst)\"\nnote\n"
    );
}

#[test]
fn test_heading_weights() {
    let text = render(
        "<document>\
           <section><title>One</title>\
             <section><title>Two</title>\
               <section><title>Three</title></section>\
             </section>\
           </section>\
         </document>",
    );
    assert_eq!(text, "## One\n\n### Two\n\n#### Three\n");

    let config = RenderConfig {
        max_heading_weight: 2,
        ..Default::default()
    };
    let doc = parse_docutils_xml(
        "<document><section><section><title>Deep</title></section></section></document>",
    )
    .unwrap();
    let text = MarkdownRenderer::with_config(config)
        .unwrap()
        .render(&doc)
        .unwrap();
    assert_eq!(text, "## Deep\n");
}

#[test]
fn test_nested_structures() {
    let text = render(
        "<document>\
           <block_quote>\
             <bullet_list>\
               <list_item>\
                 <paragraph>first line</paragraph>\
                 <block_quote><paragraph>quoted</paragraph></block_quote>\
               </list_item>\
               <list_item><paragraph>second</paragraph></list_item>\
             </bullet_list>\
           </block_quote>\
         </document>",
    );
    // blank lines inside a quote carry no prefix
    assert_eq!(text, "> * first line\n\n>   > quoted\n> * second\n");
}

#[test]
fn test_math_and_sub_superscript() {
    let text = render(
        "<document>\
           <paragraph>Let <math>x</math> be H<subscript>2</subscript>O<superscript>+</superscript>.</paragraph>\
           <math_block>x^2 + y^2 = z^2</math_block>\
         </document>",
    );
    assert_eq!(
        text,
        "Let $x$ be H<sub>2</sub>O<sup>+</sup>.\n\n$$\nx^2 + y^2 = z^2\n$$\n"
    );
}

#[test]
fn test_tilde_fences() {
    let doc = parse_docutils_xml(
        "<document><literal_block classes=\"code rust\">fn main() {}\n</literal_block></document>",
    )
    .unwrap();
    let config = RenderConfig {
        fence_style: FenceStyle::Tilde,
        ..Default::default()
    };
    let text = MarkdownRenderer::with_config(config)
        .unwrap()
        .render(&doc)
        .unwrap();
    assert_eq!(text, "~~~rust\nfn main() {}\n~~~\n");
}

#[test]
fn test_only_directive_and_comment() {
    let text = render(
        "<document>\
           <only expr=\"markdown\"><paragraph>  Just for Markdown</paragraph></only>\
           <only expr=\"latex\"><paragraph>Not here</paragraph></only>\
           <comment xml:space=\"preserve\">hidden</comment>\
         </document>",
    );
    assert_eq!(text, "Just for Markdown\n<!-- hidden -->\n");
}

#[test]
fn test_system_message() {
    let text = render(
        "<document>\
           <system_message level=\"3\" line=\"12\" source=\"index.rst\" type=\"ERROR\">\
             <paragraph>Unknown directive type.</paragraph>\
           </system_message>\
         </document>",
    );
    assert_eq!(
        text,
        "\"System Message: ERROR/3 (index.rst, line 12)\"\nUnknown directive type.\n"
    );
}

#[test]
fn test_warn_scope_per_render() {
    let doc = parse_docutils_xml("<document><figure/><figure/></document>").unwrap();
    let config = RenderConfig {
        warn_scope: WarnScope::Render,
        ..Default::default()
    };
    let mut renderer = MarkdownRenderer::with_config(config).unwrap();
    renderer.render(&doc).unwrap();
    assert_eq!(renderer.warnings().len(), 1);
    renderer.render(&doc).unwrap();
    assert_eq!(renderer.warnings().len(), 1);
}

#[test]
fn test_list_item_outside_list_aborts() {
    let doc = parse_docutils_xml("<document><list_item><paragraph>x</paragraph></list_item></document>")
        .unwrap();
    let result = MarkdownRenderer::new().unwrap().render(&doc);
    assert!(matches!(result, Err(Error::ListUnderflow)));
}
