//! Icon and colour lookup by file extension.
//!
//! Purely cosmetic. Prompts always use the plain rendering.

/// Display style for a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStyle {
    /// Icon shown before the name.
    pub icon: &'static str,
    /// Foreground colour as RGB.
    pub color: (u8, u8, u8),
}

impl FileStyle {
    const fn new(icon: &'static str, color: (u8, u8, u8)) -> Self {
        Self { icon, color }
    }
}

// Tailwind CSS palette
const ORANGE_500: (u8, u8, u8) = (249, 115, 22);
const YELLOW_500: (u8, u8, u8) = (234, 179, 8);
const BLUE_500: (u8, u8, u8) = (59, 130, 246);
const SKY_400: (u8, u8, u8) = (56, 189, 248);
const GREEN_500: (u8, u8, u8) = (34, 197, 94);
const CYAN_400: (u8, u8, u8) = (34, 211, 238);
const RED_500: (u8, u8, u8) = (239, 68, 68);
const PURPLE_500: (u8, u8, u8) = (168, 85, 247);
const PINK_500: (u8, u8, u8) = (236, 72, 153);
const AMBER_500: (u8, u8, u8) = (245, 158, 11);
const SLATE_300: (u8, u8, u8) = (203, 213, 225);
const SLATE_400: (u8, u8, u8) = (148, 163, 184);

/// Style used for unknown or missing extensions.
pub const DEFAULT_STYLE: FileStyle = FileStyle::new("📄", SLATE_400);

/// Look up the style for a lower-cased extension.
pub fn file_style(extension: Option<&str>) -> FileStyle {
    let Some(ext) = extension else {
        return DEFAULT_STYLE;
    };

    match ext {
        "rs" => FileStyle::new("🦀", ORANGE_500),
        "js" | "jsx" => FileStyle::new("📜", YELLOW_500),
        "ts" | "tsx" => FileStyle::new("📘", BLUE_500),
        "py" => FileStyle::new("🐍", SKY_400),
        "go" => FileStyle::new("🐹", CYAN_400),
        "java" | "kt" => FileStyle::new("☕", RED_500),
        "c" | "h" | "cpp" | "cs" => FileStyle::new("⚙️", BLUE_500),
        "rb" => FileStyle::new("💎", RED_500),
        "php" => FileStyle::new("🐘", PURPLE_500),
        "swift" => FileStyle::new("🕊️", ORANGE_500),
        "html" | "xml" => FileStyle::new("🌐", ORANGE_500),
        "css" | "scss" => FileStyle::new("🎨", PINK_500),
        "json" | "toml" | "yaml" | "yml" | "lock" => FileStyle::new("🔧", AMBER_500),
        "md" | "txt" => FileStyle::new("📝", SLATE_300),
        "sh" => FileStyle::new("💻", GREEN_500),
        "sql" => FileStyle::new("🗄️", PURPLE_500),
        "png" | "jpg" | "jpeg" | "gif" | "svg" => FileStyle::new("🖼️", GREEN_500),
        _ => DEFAULT_STYLE,
    }
}
