//! Command templates per automation library.
//!
//! Each command shape is a string with `${name}` placeholders. Supporting a new
//! library means adding a [`Dialect`] table, not touching the handlers.

use crate::config::Library;

/// A command the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Type,
    WaitForSelector,
    Click,
    Select,
    Goto,
    Viewport,
    Screenshot,
    ClippedScreenshot,
    WaitForNavigation,
    NavigationPromise,
    FetchFrames,
    RefetchFrames,
    BindFrame,
}

/// Template table for one automation library.
///
/// Selectors, values and URLs are inserted unescaped between single quotes,
/// so a selector such as `input[name='q']` yields invalid JavaScript.
#[derive(Debug)]
pub struct Dialect {
    pub import: &'static str,
    /// Headless launch call; the headful form is derived from it.
    pub launch: &'static str,
    type_text: &'static str,
    wait_for_selector: &'static str,
    click: &'static str,
    select: &'static str,
    goto: &'static str,
    viewport: &'static str,
    screenshot: &'static str,
    clipped_screenshot: &'static str,
    wait_for_navigation: &'static str,
    navigation_promise: &'static str,
    fetch_frames: &'static str,
    refetch_frames: &'static str,
    bind_frame: &'static str,
}

pub static PUPPETEER: Dialect = Dialect {
    import: "const puppeteer = require('puppeteer');",
    launch: "puppeteer.launch()",
    select: "await ${frame}.select('${selector}', '${value}')",
    viewport: "await ${frame}.setViewport({ width: ${width}, height: ${height} })",
    ..SHARED
};

pub static PLAYWRIGHT: Dialect = Dialect {
    import: "const { chromium } = require('playwright');",
    launch: "chromium.launch()",
    select: "await ${frame}.selectOption('${selector}', '${value}')",
    viewport: "await ${frame}.setViewportSize({ width: ${width}, height: ${height} })",
    ..SHARED
};

// Shapes both libraries accept unchanged.
const SHARED: Dialect = Dialect {
    import: "",
    launch: "",
    type_text: "await ${frame}.type('${selector}', '${value}')",
    wait_for_selector: "await ${frame}.waitForSelector('${selector}')",
    click: "await ${frame}.click('${selector}')",
    select: "",
    goto: "await ${frame}.goto('${href}')",
    viewport: "",
    screenshot: "await ${frame}.screenshot({ path: 'screenshot${n}.png' })",
    clipped_screenshot: "await ${frame}.screenshot({ path: 'screenshot${n}.png', clip: { x: ${x}, y: ${y}, width: ${width}, height: ${height} } })",
    wait_for_navigation: "await navigationPromise",
    navigation_promise: "const navigationPromise = page.waitForNavigation()",
    fetch_frames: "let frames = await page.frames()",
    refetch_frames: "frames = await page.frames()",
    bind_frame: "const ${frame} = frames.find(f => f.url() === '${url}')",
};

impl Library {
    /// Template table for this library.
    pub fn dialect(&self) -> &'static Dialect {
        match self {
            Self::Puppeteer => &PUPPETEER,
            Self::Playwright => &PLAYWRIGHT,
        }
    }
}

impl Dialect {
    pub fn template(&self, command: Command) -> &'static str {
        match command {
            Command::Type => self.type_text,
            Command::WaitForSelector => self.wait_for_selector,
            Command::Click => self.click,
            Command::Select => self.select,
            Command::Goto => self.goto,
            Command::Viewport => self.viewport,
            Command::Screenshot => self.screenshot,
            Command::ClippedScreenshot => self.clipped_screenshot,
            Command::WaitForNavigation => self.wait_for_navigation,
            Command::NavigationPromise => self.navigation_promise,
            Command::FetchFrames => self.fetch_frames,
            Command::RefetchFrames => self.refetch_frames,
            Command::BindFrame => self.bind_frame,
        }
    }

    /// Render a command with the given placeholder values.
    pub fn render(&self, command: Command, vars: &[(&str, &str)]) -> String {
        substitute(self.template(command), vars)
    }

    /// The launch call, with headless turned off when asked.
    pub fn launch_call(&self, headless: bool) -> String {
        if headless {
            self.launch.to_string()
        } else {
            self.launch.replace("launch()", "launch({ headless: false })")
        }
    }
}

/// Substitute `${name}` placeholders. Unknown names are left as-is and
/// substituted text is never rescanned.
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    let mut start = 0;

    while let Some(var_start) = result[start..].find("${") {
        let var_start = start + var_start;
        let Some(var_end) = result[var_start..].find('}') else {
            break;
        };
        let var_end = var_start + var_end;

        let name = &result[var_start + 2..var_end];
        let Some(&(_, value)) = vars.iter().find(|(k, _)| *k == name) else {
            start = var_end + 1;
            continue;
        };

        result.replace_range(var_start..=var_end, value);
        start = var_start + value.len();
    }

    result
}
