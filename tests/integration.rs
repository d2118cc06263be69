//! End-to-end tests for eoka-codegen over the public API.

use eoka_codegen::{
    footer, header, Event, Generator, Library, LineKind, Options, Recording, SkipReason,
};
use serde_json::json;

fn body_lines(script: &str, options: &Options) -> Vec<String> {
    script
        .strip_prefix(header(options).as_str())
        .and_then(|s| s.strip_suffix(footer(options).as_str()))
        .expect("script is framed by header and footer")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_example_recording() {
    let recording = Recording::load("configs/recording.jsonl").expect("Failed to load recording");
    let options = Options::load("configs/example.yaml").expect("Failed to load options");
    assert_eq!(recording.len(), 14);
    assert!(!options.headless);

    let generated = Generator::new(options.clone()).generate(&recording.events);
    let script = &generated.script;

    assert!(script.starts_with("const puppeteer = require('puppeteer');"));
    assert!(script.contains("const browser = await puppeteer.launch({ headless: false })"));
    assert!(script.contains("  await page.goto('https://shop.example.com/')\n"));
    assert!(script.contains("  await page.setViewport({ width: 1280, height: 800 })\n"));
    assert!(script.contains("  await page.type('#search', 'rust book')\n"));
    assert!(script.contains("  await page.select('#sort', 'price')\n"));
    assert!(script.contains("  await frame12.type('#card-number', '4242424242424242')\n"));
    assert!(script.contains(
        "  await page.screenshot({ path: 'screenshot0.png', clip: { x: 0, y: 120, width: 640, height: 480 } })\n"
    ));
    assert!(script.contains("  await page.screenshot({ path: 'screenshot1.png' })\n"));
    assert!(script.ends_with("  await browser.close()\n})()\n"));

    // Navigation promise is declared before everything else.
    let body = body_lines(script, &options);
    assert_eq!(body[0], "  const navigationPromise = page.waitForNavigation()");

    // One non-tab key, one non-select change, one unknown action.
    let reasons: Vec<_> = generated.skipped.iter().map(|s| s.reason.clone()).collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::NonTabKey,
            SkipReason::NonSelectChange,
            SkipReason::UnknownAction,
        ]
    );
    assert_eq!(generated.skipped[2].action, "mouseover");
    assert_eq!(generated.skipped[2].index, 11);
}

#[test]
fn test_frame_declaration_precedes_first_frame_command() {
    let recording = Recording::load("configs/recording.jsonl").expect("Failed to load recording");
    let options = Options {
        blank_lines_between_blocks: false,
        ..Default::default()
    };
    let generated = Generator::new(options.clone()).generate(&recording.events);
    let body = body_lines(&generated.script, &options);

    let declaration = body
        .iter()
        .position(|l| l.contains("const frame12 = frames.find("))
        .expect("frame12 is declared");
    let first_use = body
        .iter()
        .position(|l| l.contains("await frame12."))
        .expect("frame12 is used");

    assert_eq!(body[declaration - 1], "  let frames = await page.frames()");
    assert_eq!(
        body[declaration],
        "  const frame12 = frames.find(f => f.url() === 'https://pay.example.com/form')"
    );
    assert_eq!(first_use, declaration + 1);
    assert_eq!(generated.frame_declarations(), 1);
}

#[test]
fn test_declarations_match_referenced_frames() {
    let events = vec![
        Event::new("click").selector("#a").frame(1, "https://one.test"),
        Event::new("keydown").selector("#b").value("x").key_code(65).frame(2, "https://two.test"),
        Event::new("click").selector("#c").frame(3, "https://three.test"),
        Event::new("click").selector("#d").frame(1, "https://one.test"),
        Event::new("click").selector("#e"),
    ];
    let generated = Generator::new(Options::default()).generate(&events);

    // Frame 2 only produced a filtered keystroke, so it is never declared.
    assert_eq!(generated.frame_declarations(), 2);
    assert!(!generated.script.contains("const frame2"));
    assert_eq!(generated.script.matches("let frames = await page.frames()").count(), 1);
    assert_eq!(generated.script.matches("  frames = await page.frames()").count(), 1);
}

#[test]
fn test_blank_blocks_alternate() {
    let events: Vec<Event> = (0..4)
        .map(|i| Event::new("GOTO").href(format!("https://example.com/{}", i)))
        .collect();

    let plain = Generator::new(Options {
        blank_lines_between_blocks: false,
        ..Default::default()
    })
    .generate(&events);
    let spaced = Generator::new(Options::default()).generate(&events);

    let b = plain.blocks.len();
    assert_eq!(b, 4);
    assert_eq!(spaced.blocks.len(), 2 * b - 1);
    for (i, block) in spaced.blocks.iter().enumerate() {
        assert_eq!(block.is_blank(), i % 2 == 1);
        if i % 2 == 0 {
            assert_eq!(block, &plain.blocks[i / 2]);
        }
    }
}

#[test]
fn test_wrap_mode_controls_indentation() {
    let events = [
        Event::new("GOTO").href("https://example.com"),
        Event::new("click").selector("#go"),
        Event::new("SCREENSHOT"),
    ];

    let wrapped = Options::default();
    let script = Generator::new(wrapped.clone()).generate(&events).script;
    assert!(body_lines(&script, &wrapped).iter().all(|l| l.starts_with("  ")));

    let flat = Options {
        wrap_async: false,
        ..Default::default()
    };
    let script = Generator::new(flat.clone()).generate(&events).script;
    assert!(body_lines(&script, &flat).iter().all(|l| !l.starts_with(' ')));
}

#[test]
fn test_screenshot_counter_spans_frames() {
    let events = [
        Event::new("SCREENSHOT"),
        Event::new("SCREENSHOT")
            .value(json!({"x": "1px", "y": "2px", "width": "3px", "height": "4px"}))
            .frame(5, "https://five.test"),
        Event::new("SCREENSHOT"),
    ];
    let generated = Generator::new(Options::default()).generate(&events);
    let shots: Vec<_> = generated
        .blocks
        .iter()
        .flat_map(|b| b.lines())
        .filter(|l| l.kind == LineKind::Screenshot)
        .map(|l| l.text.clone())
        .collect();
    assert_eq!(
        shots,
        vec![
            "await page.screenshot({ path: 'screenshot0.png' })",
            "await frame5.screenshot({ path: 'screenshot1.png', clip: { x: 1, y: 2, width: 3, height: 4 } })",
            "await page.screenshot({ path: 'screenshot2.png' })",
        ]
    );
}

#[test]
fn test_playwright_output() {
    let options = Options {
        library: Library::Playwright,
        blank_lines_between_blocks: false,
        ..Default::default()
    };
    let events = [
        Event::new("VIEWPORT").value(json!({"width": 800, "height": 600})),
        Event::new("change").selector("#size").value("L").tag_name("select"),
    ];
    let script = Generator::new(options).generate(&events).script;
    assert!(script.starts_with("const { chromium } = require('playwright');"));
    assert!(script.contains("  const browser = await chromium.launch()\n"));
    assert!(script.contains("  await page.setViewportSize({ width: 800, height: 600 })\n"));
    assert!(script.contains("  await page.selectOption('#size', 'L')\n"));
}

#[test]
fn test_concurrent_generation() {
    let generator = std::sync::Arc::new(Generator::new(Options::default()));
    let events = std::sync::Arc::new(vec![
        Event::new("SCREENSHOT").frame(9, "https://nine.test"),
        Event::new("SCREENSHOT"),
        Event::new("NAVIGATION"),
    ]);
    let expected = generator.generate(&events).script;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = generator.clone();
            let events = events.clone();
            std::thread::spawn(move || generator.generate(&events).script)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("generation thread panicked"), expected);
    }
}
