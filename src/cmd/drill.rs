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

use rand::Rng;

use crate::cmd::make_rng;
use crate::cmd::quiz::run_quiz;
use crate::cmd::read_line;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::presentation::Board;
use crate::scheduler::is_mastered;
use crate::scheduler::record_rating;
use crate::scheduler::select_batch;
use crate::types::timestamp::Timestamp;

#[derive(Default, Debug)]
pub struct DrillSummary {
    /// The number of ratings recorded.
    pub ratings: usize,
    /// Whether every item was mastered when the drill ended.
    pub mastered: bool,
    /// Whether the learner asked to start the pop quiz.
    pub quiz_requested: bool,
}

pub fn drill_collection(
    directory: Option<String>,
    batch_size: Option<usize>,
    seed: Option<u64>,
) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let batch_size = batch_size.unwrap_or(coll.config.batch_size);
    if batch_size == 0 {
        return fail("batch size must be positive.");
    }
    log::debug!("Drilling in {}.", coll.directory.display());
    let mut rng = make_rng(seed);
    let mut input = stdin().lock();
    let mut output = stdout().lock();
    let summary = run_drill(
        &mut coll,
        batch_size,
        &mut input,
        &mut output,
        &mut rng,
        &Timestamp::now,
    )?;
    log::debug!("Drill ended after {} ratings.", summary.ratings);
    if summary.quiz_requested {
        run_quiz(
            &coll.items,
            coll.config.quiz_time_limit(),
            &mut input,
            &mut output,
            &mut rng,
        )?;
    }
    Ok(())
}

/// Run an interactive drill session over the collection's items.
///
/// The store is saved after every rating. The session ends when the
/// learner quits, input runs out, or every item is mastered.
pub fn run_drill<R: BufRead, W: Write, G: Rng + ?Sized>(
    coll: &mut Collection,
    batch_size: usize,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
    clock: &dyn Fn() -> Timestamp,
) -> Fallible<DrillSummary> {
    let mut summary = DrillSummary::default();
    if is_mastered(&coll.items) {
        summary.mastered = true;
        summary.quiz_requested = offer_quiz(input, output)?;
        return Ok(summary);
    }

    writeln!(
        output,
        "Drilling {} words. Pop a bubble by typing its number, or q to quit.",
        coll.items.len()
    )?;
    let mut board = Board::from_batch(select_batch(&mut coll.items, clock(), batch_size, rng));
    loop {
        write!(output, "\n{}", board.render(&coll.items))?;
        write!(output, "Pop a bubble: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            break;
        };
        if line == "q" {
            break;
        }
        let Ok(number) = line.parse::<usize>() else {
            writeln!(
                output,
                "Type a bubble number from 1 to {}, or q to quit.",
                board.len()
            )?;
            continue;
        };
        let index = match board.pop(number) {
            Ok(index) => index,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        {
            let item = &coll.items[index];
            writeln!(output, "{} = {}", item.primary_text, item.secondary_text)?;
        }
        if !read_rating(coll, index, input, output, clock)? {
            break;
        }
        coll.save()?;
        summary.ratings += 1;

        if is_mastered(&coll.items) {
            summary.mastered = true;
            summary.quiz_requested = offer_quiz(input, output)?;
            break;
        }
        if board.all_popped() {
            board = Board::from_batch(select_batch(&mut coll.items, clock(), batch_size, rng));
            writeln!(output, "\nNew board!")?;
        }
    }
    Ok(summary)
}

/// Prompt until the learner gives a valid rating for the item, and record
/// it. Returns false if input ran out first.
fn read_rating<R: BufRead, W: Write>(
    coll: &mut Collection,
    index: usize,
    input: &mut R,
    output: &mut W,
    clock: &dyn Fn() -> Timestamp,
) -> Fallible<bool> {
    loop {
        write!(
            output,
            "Rate your confidence for {} (1 = not confident, 5 = very confident): ",
            coll.items[index].primary_text
        )?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        let Ok(confidence) = line.parse::<u8>() else {
            writeln!(output, "Type a number from 1 to 5.")?;
            continue;
        };
        match record_rating(&mut coll.items[index], confidence, clock()) {
            Ok(()) => return Ok(true),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

fn offer_quiz<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Fallible<bool> {
    writeln!(output, "\nCongratulations! You've mastered all words!")?;
    write!(output, "Start the pop quiz? [y/N] ")?;
    output.flush()?;
    let answer = read_line(input)?;
    Ok(matches!(answer.as_deref(), Some("y" | "Y" | "yes")))
}
