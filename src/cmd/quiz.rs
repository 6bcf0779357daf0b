// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::time::Duration;
use std::time::Instant;

use rand::Rng;

use crate::cmd::make_rng;
use crate::cmd::read_line;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::presentation::Board;
use crate::scheduler::mastered_items;
use crate::types::item::Item;

#[derive(Default, Debug)]
pub struct QuizSummary {
    pub popped: usize,
    pub timed_out: bool,
}

pub fn quiz_collection(directory: Option<String>, seed: Option<u64>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let mut rng = make_rng(seed);
    let summary = run_quiz(
        &coll.items,
        coll.config.quiz_time_limit(),
        &mut stdin().lock(),
        &mut stdout().lock(),
        &mut rng,
    )?;
    log::debug!("Quiz ended with {} bubbles popped.", summary.popped);
    Ok(())
}

/// A timed round over every high-confidence item. Popping a bubble reveals
/// its translation; nothing is rated or saved.
///
/// The time limit is checked whenever the learner answers.
pub fn run_quiz<R: BufRead, W: Write, G: Rng + ?Sized>(
    items: &[Item],
    time_limit: Duration,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
) -> Fallible<QuizSummary> {
    let mut summary = QuizSummary::default();
    let order = mastered_items(items, rng);
    if order.is_empty() {
        writeln!(output, "No mastered words yet. Drill some first.")?;
        return Ok(summary);
    }
    let mut board = Board::new(order);
    writeln!(
        output,
        "Pop quiz! {} bubbles, {} seconds.",
        board.len(),
        time_limit.as_secs()
    )?;
    let started = Instant::now();
    loop {
        write!(output, "\n{}", board.render(items))?;
        write!(output, "Pop a bubble: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            break;
        };
        if line == "q" {
            break;
        }
        if started.elapsed() >= time_limit {
            writeln!(output, "Time's up! Great job!")?;
            summary.timed_out = true;
            break;
        }
        let Ok(number) = line.parse::<usize>() else {
            writeln!(output, "Type a bubble number, or q to quit.")?;
            continue;
        };
        match board.pop(number) {
            Ok(index) => {
                let item = &items[index];
                writeln!(output, "{} = {}", item.primary_text, item.secondary_text)?;
                summary.popped += 1;
            }
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        }
        if board.all_popped() {
            writeln!(output, "\nAll popped! Great job!")?;
            break;
        }
    }
    Ok(summary)
}
