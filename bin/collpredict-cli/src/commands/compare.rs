// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `coll-predict compare` command: rank an operation's algorithms.

use collective::{AlgorithmParam, OperationKind};
use predictor::{MessageSize, Predictor, PredictorConfig};

pub async fn execute(
    config: PredictorConfig,
    op: OperationKind,
    root: Option<i64>,
    size: String,
    json: bool,
) -> anyhow::Result<()> {
    let size = MessageSize::parse(&size)?;
    // Every modelled algorithm accepts a root, so default to rank 0.
    let param = AlgorithmParam::Root(root.unwrap_or(0));

    let predictor = Predictor::from_config(&config)?;
    let comparison = predictor.compare(op, size.as_bytes(), param)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    super::banner("Algorithm Comparison");
    println!("  {}", predictor.topology().summary());
    println!();
    print!("{}", comparison.summary());
    match comparison.best() {
        Some(best) => println!("\n  Cheapest: {} ({:.4})", best.algorithm, best.total_cost),
        None => println!("\n  No modelled algorithm for {op}."),
    }
    Ok(())
}
