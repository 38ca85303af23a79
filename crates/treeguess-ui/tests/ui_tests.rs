use std::cell::RefCell;
use std::fs;

use tempfile::TempDir;
use treeguess_analyze::{Analyzer, PromptLanguage};
use treeguess_core::TreeNode;
use treeguess_scan::FsEntry;
use treeguess_ui::{Indicator, Session, Settings, View};

#[derive(Default)]
struct Recorder {
    indicators: RefCell<Vec<(Indicator, bool)>>,
    structures: RefCell<Vec<String>>,
    results: RefCell<Vec<String>>,
}

impl View for Recorder {
    fn set_indicator(&self, indicator: Indicator, visible: bool) {
        self.indicators.borrow_mut().push((indicator, visible));
    }
    fn show_structure(&self, _: &TreeNode, structure: &str) {
        self.structures.borrow_mut().push(structure.to_string());
    }
    fn show_result(&self, text: &str) {
        self.results.borrow_mut().push(text.to_string());
    }
    fn show_error(&self, _: &str) {}
}

struct Echo;

impl Analyzer for Echo {
    async fn analyze(&self, structure: &str, model: &str) -> String {
        format!("{model}: {} lines", structure.lines().count())
    }
}

#[tokio::test]
async fn test_drop_of_real_directory() {
    let temp = TempDir::new().unwrap();
    let proj = temp.path().join("proj");
    fs::create_dir_all(proj.join("src")).unwrap();
    fs::write(proj.join("src").join("main.rs"), "fn main() {}").unwrap();
    fs::write(temp.path().join("loose.txt"), "x").unwrap();

    let dir = FsEntry::open(&proj).await.unwrap();
    let file = FsEntry::open(temp.path().join("loose.txt")).await.unwrap();

    let mut session = Session::new(Recorder::default(), Echo, "m");
    let processed = session.handle_drop([file, dir]).await;

    assert_eq!(processed, 1);
    assert_eq!(
        *session.view().structures.borrow(),
        vec!["📁 proj/\n  📁 src/\n    - main.rs (12 B)\n".to_string()]
    );
    assert_eq!(*session.view().results.borrow(), vec!["m: 3 lines".to_string()]);

    let indicators = session.view().indicators.borrow();
    for indicator in [Indicator::Processing, Indicator::Loading] {
        let shown = indicators.iter().filter(|(i, v)| *i == indicator && *v).count();
        let hidden = indicators.iter().filter(|(i, v)| *i == indicator && !*v).count();
        assert_eq!(shown, 1);
        assert_eq!(hidden, 1);
    }
}

#[test]
fn test_settings_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("settings.toml");

    let settings = Settings {
        model: "local/model".to_string(),
        depth: 4,
        ignore: vec!["node_modules".to_string(), "^\\.git$".to_string()],
        language: PromptLanguage::Chinese,
        ..Settings::default()
    };
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_settings_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();

    let missing = temp.path().join("missing.toml");
    assert_eq!(Settings::load_from(&missing), Settings::default());

    let invalid = temp.path().join("invalid.toml");
    fs::write(&invalid, "depth = \"deep\"\n[[[").unwrap();
    assert_eq!(Settings::load_from(&invalid), Settings::default());
}
