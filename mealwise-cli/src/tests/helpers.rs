//! Temporary workspaces and sample inputs for CLI tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Six meals mixing diets, flavours, prices and rating histories.
pub(super) const SAMPLE_MENU_CSV: &str = "\
id,name,price,calories,diet,flavor,ratings
1,Mushroom Risotto,12.5,640,vegetarian,\"savory, umami\",5;4
2,Chili Tofu,9.0,480,vegan,spicy,4
3,Smoked Brisket,24.0,1100,meat,\"rich, smoky\",5;5;3
4,Honey Cake,6.5,420,vegetarian,sweet,
5,Citrus Salmon,15.0,560,pescatarian,\"fresh, citrus\",2;3
6,Spicy Peanut Noodles,11.0,700,vegan,\"savory, spicy\",4;4
";

/// A scratch directory that lives as long as the test.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }

    pub(super) fn sample_csv(&self) -> Utf8PathBuf {
        self.write("menu.csv", SAMPLE_MENU_CSV)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Ids of the recommended meals in printed order.
pub(super) fn recommended_ids(stdout: &str) -> Vec<String> {
    let output: serde_json::Value = serde_json::from_str(stdout).expect("stdout should be JSON");
    output["recommendations"]
        .as_array()
        .expect("recommendations array")
        .iter()
        .map(|item| item["id"].as_str().expect("string id").to_owned())
        .collect()
}
