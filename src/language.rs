use std::fs;
use std::path::Path;

/// Resolve a language label for a file. Well-known filenames win over the
/// extension, since a name like `Cargo.toml` carries more information than
/// its generic `.toml` extension.
pub fn classify(extension: Option<&str>, filename: &str) -> &'static str {
    if let Some(lang) = special_filename(filename) {
        return lang;
    }

    if let Some(ext) = extension {
        if let Some(lang) = by_extension(&ext.to_lowercase()) {
            return lang;
        }
    }

    // Hidden files without an extension are almost always tool config.
    if filename.starts_with('.') && extension.is_none() {
        return "Config";
    }

    if extension.is_none() {
        return "No Extension";
    }
    "Other"
}

fn special_filename(filename: &str) -> Option<&'static str> {
    let lang = match filename {
        "Dockerfile" => "Dockerfile",
        "Makefile" => "Makefile",
        "Rakefile" | "Gemfile" | "Podfile" => "Ruby",
        "CMakeLists.txt" => "CMake",
        "package.json" | "tsconfig.json" => "JSON",
        "webpack.config.js" | "rollup.config.js" | "vite.config.js" | "vue.config.js" => {
            "JavaScript"
        }
        ".gitignore" | ".dockerignore" => "Config",
        ".eslintrc" | ".prettierrc" => "JSON",
        "requirements.txt" => "Text",
        "go.mod" | "go.sum" => "Go Module",
        "Cargo.toml" | "Cargo.lock" | "pyproject.toml" | "Pipfile" => "TOML",
        "pom.xml" => "XML",
        "build.gradle" => "Gradle",
        _ => return None,
    };
    Some(lang)
}

fn by_extension(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        // Programming languages
        "go" => "Go",
        "py" => "Python",
        "js" | "jsx" => "JavaScript",
        "ts" | "tsx" => "TypeScript",
        "java" => "Java",
        "c" => "C",
        "cpp" | "cc" | "cxx" => "C++",
        "h" => "C/C++ Header",
        "hpp" => "C++ Header",
        "cs" => "C#",
        "rb" => "Ruby",
        "php" => "PHP",
        "swift" => "Swift",
        "kt" => "Kotlin",
        "rs" => "Rust",
        "scala" => "Scala",
        "r" => "R",
        "m" => "Objective-C",
        "dart" => "Dart",
        "lua" => "Lua",
        "pl" => "Perl",
        "sh" | "bash" | "zsh" | "fish" => "Shell",
        "sql" => "SQL",

        // Web
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sass" => "Sass",
        "less" => "Less",
        "vue" => "Vue",
        "svelte" => "Svelte",

        // Data & config
        "json" => "JSON",
        "yaml" | "yml" => "YAML",
        "xml" => "XML",
        "toml" => "TOML",
        "ini" => "INI",
        "env" => "Environment",
        "conf" | "cfg" => "Config",

        // Documentation
        "md" => "Markdown",
        "rst" => "reStructuredText",
        "txt" => "Text",
        "tex" => "LaTeX",
        "adoc" => "AsciiDoc",

        // Build & package
        "gradle" => "Gradle",
        "maven" => "Maven",
        "dockerfile" => "Dockerfile",
        "mk" => "Makefile",

        // Others
        "proto" => "Protocol Buffers",
        "graphql" | "gql" => "GraphQL",

        _ => return None,
    };
    Some(lang)
}

/// Whether line counting should be attempted for this extension. Consulted
/// before any read so binary content is never scanned as text.
pub fn is_text_like(extension: Option<&str>) -> bool {
    let ext = match extension {
        Some(ext) => ext.to_lowercase(),
        None => return false,
    };
    matches!(
        ext.as_str(),
        "go" | "py"
            | "js"
            | "ts"
            | "jsx"
            | "tsx"
            | "java"
            | "c"
            | "cpp"
            | "cc"
            | "cxx"
            | "h"
            | "hpp"
            | "cs"
            | "rb"
            | "php"
            | "swift"
            | "kt"
            | "rs"
            | "scala"
            | "r"
            | "m"
            | "dart"
            | "lua"
            | "pl"
            | "sh"
            | "bash"
            | "zsh"
            | "fish"
            | "sql"
            | "html"
            | "htm"
            | "css"
            | "scss"
            | "sass"
            | "less"
            | "vue"
            | "svelte"
            | "json"
            | "yaml"
            | "yml"
            | "xml"
            | "toml"
            | "ini"
            | "md"
            | "rst"
            | "txt"
            | "tex"
            | "proto"
            | "graphql"
            | "gql"
    )
}

/// Count lines the way a buffered line scanner would: `\n` separates lines
/// and a trailing partial line still counts. Operates on raw bytes so
/// non-UTF-8 content cannot fail the count.
pub fn count_lines(path: &Path) -> std::io::Result<usize> {
    let data = fs::read(path)?;
    let newlines = data.iter().filter(|&&b| b == b'\n').count();
    match data.last() {
        None => Ok(0),
        Some(b'\n') => Ok(newlines),
        Some(_) => Ok(newlines + 1),
    }
}
