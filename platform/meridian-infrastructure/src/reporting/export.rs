use std::fs;
use std::io::Write;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|err| format!("failed to create directory {}: {}", path.display(), err))
}

pub fn write_page(path: &Path, html: &str) -> Result<(), String> {
    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create html {}: {}", path.display(), err))?;
    file.write_all(html.as_bytes())
        .map_err(|err| format!("failed to write html {}: {}", path.display(), err))
}
