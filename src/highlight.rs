// Maps file extensions to the syntax-highlighting token the paste
// services expect. Both supported services use GeSHi language names, so a
// single table serves them.

/// Token used when nothing better is known.
pub const PLAIN_TEXT: &str = "text";

const LANGUAGES: &[(&str, &str)] = &[
    ("php", "php"),
    ("pas", "delphi"),
    ("rb", "ruby"),
    ("as3", "actionscript3"),
    ("asm", "asm"),
    ("sh", "bash"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("hpp", "cpp"),
    ("css", "css"),
    ("erl", "erlang"),
    ("go", "go"),
    ("lua", "lua"),
    ("html5", "html5"),
    ("html", "html5"),
    ("htm", "html5"),
    ("nginx", "nginx"),
    ("xml", "xml"),
    ("py", "python"),
    ("js", "javascript"),
    ("java", "java"),
    ("rs", "rust"),
    ("sql", "sql"),
    ("pl", "perl"),
    ("diff", "diff"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("ini", "ini"),
];

/// Resolve a file extension (with or without the leading dot, any case)
/// to a highlight token. Unknown and empty extensions yield [`PLAIN_TEXT`].
pub fn language_for(ext: &str) -> &'static str {
    let ext = ext.strip_prefix('.').unwrap_or(ext).to_lowercase();
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, token)| *token)
        .unwrap_or(PLAIN_TEXT)
}
