//! Preview document assembly
//!
//! Wraps a flattened script body, the aggregated stylesheet block, and
//! fixed CDN-hosted runtime includes into one standalone HTML document.
//! The inline mount script runs inside a guarded block: any synchronous
//! exception replaces the mount point with a visible error panel instead of
//! leaving a blank page. Assembly is deterministic — identical inputs
//! produce byte-identical output.

use crate::inline::ENTRY_SYMBOL;

/// Pinned runtime includes. The specifier→global table in
/// [`crate::resolve`] covers exactly these libraries.
pub const CDN_REACT: &str = "https://unpkg.com/react@18/umd/react.development.js";
/// ReactDOM UMD build matching [`CDN_REACT`].
pub const CDN_REACT_DOM: &str = "https://unpkg.com/react-dom@18/umd/react-dom.development.js";
/// In-browser JSX transform; the flattened body is emitted as `text/babel`.
pub const CDN_BABEL: &str = "https://unpkg.com/@babel/standalone/babel.min.js";
/// Tailwind runtime replacing the stripped `@tailwind` build directives.
pub const CDN_TAILWIND: &str = "https://cdn.tailwindcss.com";

/// Assemble the standalone preview document
///
/// The document is generated atomically as one string; it is never
/// partially applied.
#[must_use]
pub fn assemble(script_body: &str, styles: &str, project_name: &str) -> String {
    let title = escape_html(project_name);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Preview - {title}</title>
    <!-- External Libraries -->
    <script src="{CDN_REACT}"></script>
    <script src="{CDN_REACT_DOM}"></script>
    <script src="{CDN_BABEL}"></script>
    <script src="{CDN_TAILWIND}"></script>

    <style>
        {styles}

        body {{
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
        }}
        #root {{
            min-height: 100vh;
        }}
        .error {{
            color: red;
            padding: 20px;
            font-family: monospace;
            white-space: pre-wrap;
        }}
    </style>
</head>
<body>
    <div id="root">
        <div style="padding: 20px; text-align: center;">
            <p>Loading preview...</p>
        </div>
    </div>

    <script type="text/babel">
        // Make the runtimes available under the names the flattened body expects
        window.React = React;
        window.ReactDOM = ReactDOM;

        try {{
            {script_body}

            // Mount the entry component, or a placeholder if flattening
            // left no entry symbol behind
            let AppComponent = typeof {ENTRY_SYMBOL} !== 'undefined' ? {ENTRY_SYMBOL} :
                function() {{
                    return React.createElement('div', {{
                        className: 'min-h-screen p-8'
                    }},
                    React.createElement('h1', {{ className: 'text-4xl font-bold mb-4' }}, 'Nothing to preview yet'),
                    React.createElement('p', null, 'Generate some code to see it here')
                    );
                }};

            const root = ReactDOM.createRoot(document.getElementById('root'));
            root.render(React.createElement(AppComponent));

        }} catch (error) {{
            document.getElementById('root').innerHTML =
                '<div class="error"><strong>Preview Error:</strong><br/>' + error.message + '<br/><br/>' + error.stack + '</div>';
            console.error('Preview error:', error);
        }}
    </script>
</body>
</html>"#
    )
}

/// Minimal escaping for text interpolated into the document head
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
