use std::path::Path;

use super::config::{FileConf, FileContent, Layout, LayoutEntry, LinkConf};
use super::error::Result;
use super::path_glob::expand_single;
use super::test_directory::{LinkOptions, TestDirectory};

impl TestDirectory {
    /// Creates the entries of a YAML or JSON layout inside the directory.
    ///
    /// ```rust,no_run
    /// # use testdirectory::{Result, TestDirectory};
    /// # fn populate(testdirectory: &TestDirectory) -> Result<()> {
    /// testdirectory.populate(
    ///     r#"---
    ///     - !directory
    ///         name: input
    ///         content:
    ///           - !file
    ///               name: numbers.txt
    ///               content: !inline_text "1 2 3"
    ///     "#,
    /// )?;
    /// assert!(testdirectory.contains_file("input/numbers.txt")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn populate(&self, config_str: &str) -> Result<()> {
        let layout = Layout::parse(config_str)?;
        self.populate_layout(&layout)
    }

    pub fn populate_layout(&self, layout: &Layout) -> Result<()> {
        for entry in &layout.0 {
            self.create_entry(entry)?;
        }
        Ok(())
    }

    fn create_entry(&self, entry: &LayoutEntry) -> Result<()> {
        match entry {
            LayoutEntry::Directory(conf) => {
                let directory = self.mkdir(&conf.name)?;
                for entry in &conf.content {
                    directory.create_entry(entry)?;
                }
            }
            LayoutEntry::File(conf) => self.create_file(conf)?,
            LayoutEntry::Link(conf) => self.create_layout_link(conf)?,
            LayoutEntry::CloneDirectory(conf) => {
                self.copy_dir_as(Path::new(&conf.source), Path::new(&conf.name))?;
            }
        }
        Ok(())
    }

    fn create_file(&self, conf: &FileConf) -> Result<()> {
        match &conf.content {
            FileContent::InlineBytes(data) => self.write_binary(&conf.name, data)?,
            FileContent::InlineText(text) => self.write_text(&conf.name, text)?,
            FileContent::EncodedText { text, encoding } => {
                self.write_text_encoded(&conf.name, text, *encoding)?
            }
            FileContent::OriginalFile(pattern) => self.copy_file_as(pattern, &conf.name)?,
            FileContent::Empty => self.write_binary(&conf.name, b"")?,
        };
        Ok(())
    }

    fn create_layout_link(&self, conf: &LinkConf) -> Result<()> {
        let is_dir = expand_single(&conf.target)?.is_dir();
        let options = LinkOptions {
            rename_as: Some(conf.name.clone()),
            relative: conf.relative,
        };
        self.create_link(Path::new(&conf.target), &options, is_dir)?;
        Ok(())
    }
}
