//! Starter project template
//!
//! Every new project begins from this fixed file set: a single-page React
//! app with a Vite-style layout. The executor phase overwrites and extends
//! these files; the preview pipeline only ever consumes `src/App.tsx` (as
//! the root component) and the stylesheets.

use crate::filemap::FileMap;

const APP_TSX: &str = r#"import React from 'react';

function App() {
  return (
    <div className="min-h-screen p-8">
      <h1 className="text-4xl font-bold mb-4">Hello Vibeforge!</h1>
      <p>Start coding with AI assistance</p>
    </div>
  );
}

export default App;
"#;

const INDEX_CSS: &str = r"@tailwind base;
@tailwind components;
@tailwind utilities;

body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen';
}
";

const PACKAGE_JSON: &str = r#"{
  "name": "vibeforge-project",
  "version": "1.0.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "vite build",
    "preview": "vite preview"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0"
  },
  "devDependencies": {
    "@vitejs/plugin-react": "^4.0.0",
    "vite": "^4.4.0"
  }
}
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Vibeforge Project</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#;

const VITE_CONFIG: &str = r"import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

export default defineConfig({
  plugins: [react()],
  server: {
    port: 5173
  }
})
";

const MAIN_TSX: &str = r"import React from 'react'
import ReactDOM from 'react-dom/client'
import App from './App.tsx'
import './index.css'

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
)
";

/// Build the starter file map for a new project
#[must_use]
pub fn starter_files() -> FileMap {
    FileMap::from_iter([
        ("src/App.tsx", APP_TSX),
        ("src/index.css", INDEX_CSS),
        ("package.json", PACKAGE_JSON),
        ("index.html", INDEX_HTML),
        ("vite.config.js", VITE_CONFIG),
        ("src/main.tsx", MAIN_TSX),
    ])
}

/// Path of the root component the preview pipeline flattens from
#[must_use]
pub fn root_component() -> crate::path::ProjectPath {
    crate::path::ProjectPath::new("src/App.tsx")
}
