//! Rewrites over the finished block list, run before serialization.

use super::block::{Block, Line, LineKind};
use super::frames::{frame_name, FrameRegistry};
use super::templates::{Command, Dialect};
use tracing::debug;

/// Declare each referenced sub-frame once, right before its first use.
///
/// A block gets at most one declaration per sweep; sweeps repeat until every
/// pending frame is declared or no block references one.
pub(super) fn hoist_frame_declarations(
    blocks: &mut [Block],
    frames: &mut FrameRegistry,
    dialect: &Dialect,
) {
    let refetch = dialect.render(Command::RefetchFrames, &[]);
    let mut declared = 0;

    loop {
        let before = declared;
        for block in blocks.iter_mut() {
            if frames.is_empty() {
                break;
            }
            let Some(id) = block.frame_refs().find(|&id| frames.is_pending(id)) else {
                continue;
            };
            let Some(url) = frames.take(id) else {
                continue;
            };
            let name = frame_name(id);
            let bind = dialect.render(Command::BindFrame, &[("frame", name.as_str()), ("url", url.as_str())]);
            block.push_front(Line::new(LineKind::FrameSet, bind));
            block.push_front(Line::new(LineKind::FrameSet, refetch.clone()));
            declared += 1;
        }
        if declared == before || frames.is_empty() {
            break;
        }
    }

    if !frames.is_empty() {
        debug!("{} frames seen but never referenced by a command", frames.len());
    }
    if declared > 0 {
        declare_frames_list(blocks, dialect, &refetch);
    }
}

/// The first frame fetch in output order declares `frames`; the rest re-fetch.
fn declare_frames_list(blocks: &mut [Block], dialect: &Dialect, refetch: &str) {
    let first = blocks
        .iter_mut()
        .find(|b| b.lines().iter().any(|l| l.kind == LineKind::FrameSet && l.text == refetch));
    if let Some(block) = first {
        block.replace_first(
            |l| l.kind == LineKind::FrameSet && l.text == refetch,
            dialect.render(Command::FetchFrames, &[]),
        );
    }
}

/// Put an empty block between every pair of adjacent blocks.
pub(super) fn insert_blank_lines(blocks: &mut Vec<Block>) {
    let original = std::mem::take(blocks);
    blocks.reserve(original.len().saturating_mul(2));
    for (i, block) in original.into_iter().enumerate() {
        if i > 0 {
            blocks.push(Block::blank());
        }
        blocks.push(block);
    }
}
