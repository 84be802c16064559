//! Language registry and alias canonicalization.

/// A highlighting language the editor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub label: &'static str,
    pub id: &'static str,
}

/// Sorted languages recognized by the editor.
pub const KNOWN_LANGUAGES: &[LanguageOption] = &[
    LanguageOption { label: "Batch", id: "bat" },
    LanguageOption { label: "C", id: "c" },
    LanguageOption { label: "C++", id: "cpp" },
    LanguageOption { label: "C#", id: "csharp" },
    LanguageOption { label: "Clojure", id: "clojure" },
    LanguageOption { label: "CoffeeScript", id: "coffeescript" },
    LanguageOption { label: "CSS", id: "css" },
    LanguageOption { label: "Dart", id: "dart" },
    LanguageOption { label: "Dockerfile", id: "dockerfile" },
    LanguageOption { label: "Elixir", id: "elixir" },
    LanguageOption { label: "F#", id: "fsharp" },
    LanguageOption { label: "Go", id: "go" },
    LanguageOption { label: "GraphQL", id: "graphql" },
    LanguageOption { label: "HCL", id: "hcl" },
    LanguageOption { label: "HTML", id: "html" },
    LanguageOption { label: "INI", id: "ini" },
    LanguageOption { label: "Java", id: "java" },
    LanguageOption { label: "JavaScript", id: "javascript" },
    LanguageOption { label: "JSON", id: "json" },
    LanguageOption { label: "Julia", id: "julia" },
    LanguageOption { label: "Kotlin", id: "kotlin" },
    LanguageOption { label: "Less", id: "less" },
    LanguageOption { label: "Lua", id: "lua" },
    LanguageOption { label: "Markdown", id: "markdown" },
    LanguageOption { label: "MySQL", id: "mysql" },
    LanguageOption { label: "Objective-C", id: "objective-c" },
    LanguageOption { label: "Pascal", id: "pascal" },
    LanguageOption { label: "Perl", id: "perl" },
    LanguageOption { label: "PostgreSQL", id: "pgsql" },
    LanguageOption { label: "PHP", id: "php" },
    LanguageOption { label: "Plain text", id: "plaintext" },
    LanguageOption { label: "PowerShell", id: "powershell" },
    LanguageOption { label: "Python", id: "python" },
    LanguageOption { label: "R", id: "r" },
    LanguageOption { label: "Ruby", id: "ruby" },
    LanguageOption { label: "Rust", id: "rust" },
    LanguageOption { label: "Scala", id: "scala" },
    LanguageOption { label: "Scheme", id: "scheme" },
    LanguageOption { label: "SCSS", id: "scss" },
    LanguageOption { label: "Shell", id: "shell" },
    LanguageOption { label: "Solidity", id: "sol" },
    LanguageOption { label: "SQL", id: "sql" },
    LanguageOption { label: "Swift", id: "swift" },
    LanguageOption { label: "Tcl", id: "tcl" },
    LanguageOption { label: "TOML", id: "toml" },
    LanguageOption { label: "TypeScript", id: "typescript" },
    LanguageOption { label: "Visual Basic", id: "vb" },
    LanguageOption { label: "XML", id: "xml" },
    LanguageOption { label: "YAML", id: "yaml" },
];

/// Convert file extensions and aliases to registry ids.
///
/// # Returns
/// Lowercase id (or empty string for empty/whitespace input). Unknown input is
/// returned lowercased so callers can still report it.
pub fn canonicalize(language: &str) -> String {
    let lowered = language.trim().to_ascii_lowercase();
    let id = match lowered.as_str() {
        "rs" => "rust",
        "py" | "pyw" => "python",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "rb" => "ruby",
        "kt" | "kts" => "kotlin",
        "cs" | "c#" => "csharp",
        "c++" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "h" => "c",
        "fs" | "fsx" => "fsharp",
        "sh" | "bash" | "zsh" => "shell",
        "ps1" | "pwsh" => "powershell",
        "yml" => "yaml",
        "md" | "markdown" => "markdown",
        "htm" => "html",
        "ex" | "exs" => "elixir",
        "pl" | "pm" => "perl",
        "m" | "mm" | "objc" | "objectivec" => "objective-c",
        "coffee" => "coffeescript",
        "clj" | "cljs" => "clojure",
        "jl" => "julia",
        "tf" => "hcl",
        "gql" => "graphql",
        "bat" | "cmd" => "bat",
        "txt" | "text" | "plain" | "plain text" => "plaintext",
        other => return other.to_string(),
    };
    id.to_string()
}

/// Returns the registry entry for an id or alias.
pub fn lookup(language: &str) -> Option<&'static LanguageOption> {
    let canonical = canonicalize(language);
    KNOWN_LANGUAGES.iter().find(|option| option.id == canonical)
}
