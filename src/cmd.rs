use clap::Parser;
use serde_json::Value;

use crate::api_client::RequestClient;
use crate::config::ClientConfig;
use crate::extract::DEFAULT_BRACKET;
use crate::request::{DEFAULT_REGION, DEFAULT_SEARCH_TYPE};
use crate::types::TeamRecord;

#[derive(Parser, Debug)]
#[command(name = "sc2ranks", about = "Query the sc2ranks.com API")]
pub enum Cmd {
    /// Look up a character by name and character code.
    Character {
        name: String,
        #[arg(allow_hyphen_values = true)]
        code: String,
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
        #[arg(long, default_value_t = DEFAULT_BRACKET)]
        bracket: i64,
    },
    /// Look up a character by name and battle.net id.
    Bnet {
        name: String,
        bnet_id: String,
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
        #[arg(long, default_value_t = DEFAULT_BRACKET)]
        bracket: i64,
    },
    /// Profile search, e.g. `search meerkat division "Division Nova"`.
    Search {
        name: String,
        subtype: String,
        value: String,
        #[arg(long, default_value = DEFAULT_SEARCH_TYPE)]
        search_type: String,
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
    },
    /// Usage statistics of a map, followed by the latest entry.
    Map { map_id: String },
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_bracket(client: &RequestClient, bracket: i64) {
    println!("\n{bracket}v{bracket} record:");
    let Some(records) = client.extract_bracket_records(None, bracket) else {
        println!(" no team data");
        return;
    };
    if records.is_empty() {
        println!(" no teams in this bracket");
    }
    for record in records {
        match TeamRecord::from_value(&record) {
            Ok(team) => println!(
                " {} | {} | {}-{} | ratio {}",
                team.league.unwrap_or_default(),
                team.division.unwrap_or_default(),
                team.wins.unwrap_or_default(),
                team.losses.unwrap_or_default(),
                team.ratio.map(|r| r.to_string()).unwrap_or_default(),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "team record has an unexpected shape");
                println!(" {record}");
            }
        }
    }
}

impl Cmd {
    pub async fn run(self, config: ClientConfig) -> anyhow::Result<()> {
        let mut client = RequestClient::new(config)?;

        match self {
            Cmd::Character {
                name,
                code,
                region,
                bracket,
            } => {
                println!("player data ({name}${code}):");
                let character = client
                    .fetch_character_by_name_code(&name, &code, &region)
                    .await?;
                print_json(&character)?;
                print_bracket(&client, bracket);
            }
            Cmd::Bnet {
                name,
                bnet_id,
                region,
                bracket,
            } => {
                println!("player data ({name}!{bnet_id}):");
                let character = client
                    .fetch_character_by_bnet_id(&name, &bnet_id, &region)
                    .await?;
                print_json(&character)?;
                print_bracket(&client, bracket);
            }
            Cmd::Search {
                name,
                subtype,
                value,
                search_type,
                region,
            } => {
                let results = client
                    .fetch_character_by_profile_search(
                        &name,
                        &subtype,
                        &value,
                        &search_type,
                        &region,
                    )
                    .await?;
                print_json(&results)?;
            }
            Cmd::Map { map_id } => {
                println!("map data ({map_id}):");
                let usage = client.fetch_map_usage(&map_id).await?;
                print_json(&usage)?;
                match client.extract_latest_map_usage(None) {
                    Some(latest) => {
                        println!("\nlatest usage ({}):", latest.date);
                        print_json(&latest.usage)?;
                    }
                    None => println!("\nno usage series in response"),
                }
            }
        }

        tracing::debug!(request = ?client.last_request(), "done");
        Ok(())
    }
}
