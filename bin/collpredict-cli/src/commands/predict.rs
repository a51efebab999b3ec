// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `coll-predict predict` command: cost one algorithm over a size sweep.
//!
//! Every size is costed on its own blocking task; the table lists them
//! in the order given on the command line.

use collective::{AlgorithmKind, AlgorithmParam, OperationKind};
use predictor::{parse_size_list, Predictor, PredictorConfig};

pub async fn execute(
    config: PredictorConfig,
    op: OperationKind,
    algo: AlgorithmKind,
    root: Option<i64>,
    sizes: String,
    rounds: bool,
    json: bool,
) -> anyhow::Result<()> {
    let sizes = parse_size_list(&sizes)?;
    let param = root.map_or(AlgorithmParam::Absent, AlgorithmParam::Root);

    let predictor = Predictor::from_config(&config)?;
    let predictions = predictor
        .predict_many_concurrent(op, algo, &sizes, param)
        .await?;
    let report = predictor.report(op, algo, predictions);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    super::banner("Prediction");
    println!("  Config:");
    println!("   Nodes:     {}", config.nodes);
    println!("   PPN:       {}", config.ppn);
    println!("   Placement: {}", config.arrangement());
    println!("   Param:     {param}");
    println!();
    print!("{}", report.summary());

    if rounds {
        for p in &report.predictions {
            println!();
            print!("{}", p.summary());
        }
    }
    Ok(())
}
