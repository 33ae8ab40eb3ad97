use xpath_assert::EvaluationError;

/// Report an XPath error on stderr, pointing into the expression when the
/// error has a span.
pub(crate) fn render_error(src: &str, e: &EvaluationError) -> std::io::Result<()> {
    let EvaluationError::Engine {
        code,
        message,
        span,
    } = e
    else {
        eprintln!("{e}");
        return Ok(());
    };

    let red = ariadne::Color::Red;
    let mut report =
        ariadne::Report::build(ariadne::ReportKind::Error, ("xpath", 0..0)).with_code(code);

    if let Some(span) = span {
        report = report.with_label(
            ariadne::Label::new(("xpath", span.clone()))
                .with_message(message)
                .with_color(red),
        )
    } else {
        report = report.with_message(message);
    }
    report
        .finish()
        .eprint(("xpath", ariadne::Source::from(src)))
}
