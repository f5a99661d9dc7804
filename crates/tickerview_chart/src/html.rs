use crate::spec::ChartSpec;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wraps a spec in a standalone page that draws it with vega-embed.
pub fn render_html(spec: &ChartSpec, title: &str) -> serde_json::Result<String> {
    // `</` would end the script element early
    let spec_json = serde_json::to_string(spec)?.replace("</", "<\\/");

    Ok(format!(r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
    <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
    <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        h1 {{ color: #333; }}
        #chart {{ width: 100%; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <div id="chart"></div>
    <script>
        var spec = {spec_json};
        vegaEmbed('#chart', spec, {{ actions: false }});
    </script>
</body>
</html>
"#, title = escape_html(title), spec_json = spec_json))
}
