use anyhow::{Context, Result};
use comfy_table::Table;

use linelist_cli::pipeline::{self, CleanOptions, CleanResult, default_output_dir, load_config};
use linelist_model::{CleaningConfig, DeriveRule, MatchMode, SemanticType, format_day_first};
use linelist_normalization::normalization::MAX_AGE_YEARS;
use linelist_output::OutputFormat;

use crate::cli::{CleanArgs, OutputFormatArg, SchemaArgs};
use crate::summary::apply_table_style;

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let config = load_config(args.config.as_deref(), args.impute_age)?;
    let options = CleanOptions {
        input: args.input.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.input)),
        format: match args.format {
            OutputFormatArg::Feather => OutputFormat::Feather,
            OutputFormatArg::Csv => OutputFormat::Csv,
        },
        dry_run: args.dry_run,
    };
    pipeline::run_clean(&options, &config)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), None)?;

    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Cleaning"]);
    apply_table_style(&mut table);
    for spec in &config.columns {
        table.add_row(vec![
            spec.name.clone(),
            spec.kind.name().to_string(),
            describe_type(&spec.kind),
        ]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec!["Derived", "Rule", "Reads", "Output"]);
    apply_table_style(&mut table);
    for column in &config.derived {
        let output = match &column.rule {
            DeriveRule::Recode { output, .. } => output.as_str(),
            DeriveRule::Complement { .. } | DeriveRule::Interval { .. } => "int",
        };
        table.add_row(vec![
            column.name.clone(),
            column.rule.name().to_string(),
            column.dependencies().join(", "),
            output.to_string(),
        ]);
    }
    println!("{table}");
    print_snapshot_settings(&config);
    Ok(())
}

pub fn run_config() -> Result<()> {
    let config = CleaningConfig::ncov2019().context("build default config")?;
    println!("{}", config.to_json_pretty().context("serialize config")?);
    Ok(())
}

fn print_snapshot_settings(config: &CleaningConfig) {
    println!(
        "Complete cases require: {}",
        config.complete_case_columns.join(", ")
    );
    println!("Imputed column: {} ({:?})", config.impute.column, config.impute.policy);
}

fn describe_type(kind: &SemanticType) -> String {
    match kind {
        SemanticType::Date(policy) => {
            let missing = policy
                .missing
                .map_or_else(|| "absent".to_string(), format_day_first);
            format!(
                "not before {}, missing {missing}",
                format_day_first(policy.valid_start)
            )
        }
        SemanticType::Age => format!("years, 0 to {MAX_AGE_YEARS}"),
        SemanticType::Float => "finite float".to_string(),
        SemanticType::Coordinate { axis } => format!("|value| <= {}", axis.limit()),
        SemanticType::Binary { missing } => match missing {
            Some(value) => format!("0/1, missing {value}"),
            None => "0/1, missing absent".to_string(),
        },
        SemanticType::Categorical {
            recode: Some(table),
        } => {
            let mode = match table.match_mode() {
                MatchMode::CaseInsensitive => "case-insensitive",
                MatchMode::Exact => "exact",
            };
            let missing = table
                .missing()
                .map_or_else(|| "absent".to_string(), ToString::to_string);
            format!("{} forms, {mode}, missing {missing}", table.len())
        }
        SemanticType::Categorical { recode: None } | SemanticType::Text => {
            "unchanged".to_string()
        }
    }
}
