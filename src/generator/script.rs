//! Serialization of blocks into the final script text.

use super::block::Block;
use crate::config::Options;

/// Indentation for lines inside the async entry point.
const WRAP_INDENT: &str = "  ";

/// Header, body and footer for the given options.
pub(super) fn render(blocks: &[Block], options: &Options) -> String {
    let indent = if options.wrap_async { WRAP_INDENT } else { "" };
    let mut script = header(options);
    for line in blocks.iter().flat_map(|b| b.lines()) {
        script.push_str(indent);
        script.push_str(&line.text);
        script.push('\n');
    }
    script.push_str(&footer(options));
    script
}

/// Library import plus browser and page setup.
pub fn header(options: &Options) -> String {
    let dialect = options.library.dialect();
    let launch = dialect.launch_call(options.headless);
    if options.wrap_async {
        format!(
            "{}\n\n(async () => {{\n{i}const browser = await {}\n{i}const page = await browser.newPage()\n",
            dialect.import,
            launch,
            i = WRAP_INDENT
        )
    } else {
        format!(
            "{}\n\nconst browser = await {}\nconst page = await browser.newPage()\n",
            dialect.import, launch
        )
    }
}

/// Closes the browser, and the entry point when wrapped.
pub fn footer(options: &Options) -> String {
    if options.wrap_async {
        format!("{}await browser.close()\n}})()\n", WRAP_INDENT)
    } else {
        "await browser.close()\n".to_string()
    }
}
