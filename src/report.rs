
use log::{debug, info};
use serde::Serialize;
use simple_error::bail;
use std::fs::File;
use std::path::Path;

use crate::data_types::association::AssociationResult;
use crate::data_types::confidence::ConfidenceTier;

/// Default GitHub repository that hosts the catalog
pub const DEFAULT_GITHUB_REPO: &str = "jodyphelan/tbdb";
const GITHUB_API_URL: &str = "https://api.github.com";

const TABLE_HEADER: &str = "| Drug | Gene | Mutation | OR | OR-pval | LR | LR-pval | confidence |\n|-|-|-|-|-|-|-|-|\n";

/// Renders the comment body, each section is only included if it has entries
/// # Arguments
/// * `added` - results for the added catalog entries
/// * `removed` - results for the removed catalog entries
pub fn render_markdown(added: &[AssociationResult], removed: &[AssociationResult]) -> String {
    let mut body = String::from("## Mutation confidence results\n");
    for (label, results) in [("added", added), ("removed", removed)] {
        if results.is_empty() {
            continue;
        }
        body.push_str(&format!("### Mutations {label}\n"));
        body.push_str(TABLE_HEADER);
        for r in results.iter() {
            body.push_str(&format!(
                "|{}|{}|{}|{:.3}|{:.3e}|{:.3}|{:.3e}|{}|\n",
                r.drug(), r.gene(), r.mutation(),
                r.odds_ratio(), r.odds_ratio_pvalue(),
                r.risk_ratio(), r.risk_ratio_pvalue(),
                r.confidence()
            ));
        }
    }
    body
}

/// Flattened form of a result for the CSV/TSV output
#[derive(Serialize)]
struct ResultRow<'a> {
    change: &'a str,
    drug: &'a str,
    gene: &'a str,
    mutation: &'a str,
    variant_type: &'a str,
    variant_resistant: f64,
    variant_susceptible: f64,
    reference_resistant: f64,
    reference_susceptible: f64,
    odds_ratio: f64,
    odds_ratio_pvalue: f64,
    risk_ratio: f64,
    risk_ratio_pvalue: f64,
    confidence: ConfidenceTier
}

impl<'a> ResultRow<'a> {
    fn new(change: &'a str, result: &'a AssociationResult) -> Self {
        let [[variant_resistant, variant_susceptible], [reference_resistant, reference_susceptible]] = *result.table().cells();
        Self {
            change,
            drug: result.drug(),
            gene: result.gene(),
            mutation: result.mutation(),
            variant_type: result.variant_type().unwrap_or(""),
            variant_resistant,
            variant_susceptible,
            reference_resistant,
            reference_susceptible,
            odds_ratio: result.odds_ratio(),
            odds_ratio_pvalue: result.odds_ratio_pvalue(),
            risk_ratio: result.risk_ratio(),
            risk_ratio_pvalue: result.risk_ratio_pvalue(),
            confidence: result.confidence()
        }
    }
}

/// Writes every result to a delimited file, tab-delimited if the name ends with .tsv
/// # Arguments
/// * `added` - results for the added catalog entries
/// * `removed` - results for the removed catalog entries
/// * `filename` - the output path
/// # Errors
/// * if we have any errors opening or writing to the file
pub fn write_results_csv(added: &[AssociationResult], removed: &[AssociationResult], filename: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let delimiter: u8 = if filename.extension().unwrap_or_default() == "tsv" { b'\t' } else { b',' };
    let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)?;

    for (change, results) in [("added", added), ("removed", removed)] {
        for result in results.iter() {
            csv_writer.serialize(ResultRow::new(change, result))?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Identifies the commit to comment on, normally supplied by the CI environment
#[derive(Clone, Debug, PartialEq)]
pub struct GithubTarget {
    /// owner/name of the repository
    pub repo: String,
    /// commit SHA that receives the comment
    pub commit_sha: String,
    /// pull request number, informational only
    pub pull_request: Option<u64>,
    /// API token
    pub token: String
}

impl GithubTarget {
    /// Reads the target from `GH_AUTH_TOKEN`, `CIRCLE_SHA1`, and `CIRCLE_PULL_REQUEST`
    /// # Errors
    /// * if the token or commit variables are not set
    pub fn from_env(repo: &str) -> Result<GithubTarget, Box<dyn std::error::Error>> {
        Self::from_lookup(repo, |name| std::env::var(name).ok())
    }

    /// Same as `from_env`, but with an arbitrary variable lookup
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(repo: &str, lookup: F) -> Result<GithubTarget, Box<dyn std::error::Error>> {
        let token = match lookup("GH_AUTH_TOKEN") {
            Some(t) => t,
            None => bail!("GH_AUTH_TOKEN is not set, cannot post to GitHub")
        };
        let commit_sha = match lookup("CIRCLE_SHA1") {
            Some(s) => s,
            None => bail!("CIRCLE_SHA1 is not set, cannot post to GitHub")
        };
        // this is a full URL, e.g. https://github.com/jodyphelan/tbdb/pull/123
        let pull_request = lookup("CIRCLE_PULL_REQUEST")
            .and_then(|url| url.rsplit('/').next().and_then(|n| n.parse::<u64>().ok()));

        Ok(GithubTarget {
            repo: repo.to_string(),
            commit_sha,
            pull_request,
            token
        })
    }

    /// REST endpoint for commit comments
    pub fn comment_url(&self) -> String {
        format!("{GITHUB_API_URL}/repos/{}/commits/{}/comments", self.repo, self.commit_sha)
    }
}

/// Posts the report body as a comment on the target commit
/// # Arguments
/// * `body` - markdown comment body
/// * `target` - where to post it
/// # Errors
/// * if the request fails or GitHub returns an error status
pub fn post_github_comment(body: &str, target: &GithubTarget) -> Result<(), Box<dyn std::error::Error>> {
    // we need the User Agent specified for GitHub queries, set it to our tool name
    let client = reqwest::blocking::Client::builder()
        .user_agent(env!("CARGO_PKG_NAME"))
        .build()?;

    let url = target.comment_url();
    info!("Posting results to {url}");
    if let Some(pr) = target.pull_request {
        debug!("\tPull request: #{pr}");
    }
    let payload = serde_json::json!({ "body": body });
    client.post(url)
        .bearer_auth(&target.token)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(&payload)?)
        .send()?
        .error_for_status()?;
    debug!("Comment posted.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use crate::data_types::contingency::ContingencyTable;
    use crate::data_types::mutation_key::MutationKey;

    fn mock_results() -> (Vec<AssociationResult>, Vec<AssociationResult>) {
        let added = vec![AssociationResult::new(
            MutationKey::new("isoniazid", "Rv1908c", "p.Ser315Thr"),
            Some("missense".to_string()),
            ContingencyTable::from_cells([[8.5, 0.5], [2.5, 10.5]]),
            0.05
        )];
        let removed = vec![AssociationResult::new(
            MutationKey::new("rifampicin", "Rv0667", "large_deletion"),
            None,
            ContingencyTable::new(),
            0.05
        )];
        (added, removed)
    }

    #[test]
    fn test_render_markdown() {
        let (added, removed) = mock_results();
        let body = render_markdown(&added, &removed);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "## Mutation confidence results");
        assert_eq!(lines[1], "### Mutations added");
        assert_eq!(lines[2], "| Drug | Gene | Mutation | OR | OR-pval | LR | LR-pval | confidence |");
        assert!(lines[4].starts_with("|isoniazid|Rv1908c|p.Ser315Thr|71.400|"));
        assert!(lines[4].ends_with("|high|"));
        assert_eq!(lines[5], "### Mutations removed");
        assert_eq!(lines[8], "|rifampicin|Rv0667|large_deletion|1.000|1.000e0|1.000|1.000e0|indeterminate|");
        assert_eq!(lines.len(), 9);

        // empty sections are dropped
        let body = render_markdown(&added, &[]);
        assert!(!body.contains("removed"));
        assert_eq!(render_markdown(&[], &[]), "## Mutation confidence results\n");
    }

    #[test]
    fn test_write_results_csv() {
        let (added, removed) = mock_results();
        let tmp_dir = tempfile::tempdir().unwrap();

        let csv_fn = tmp_dir.path().join("confidence.csv");
        write_results_csv(&added, &removed, &csv_fn).unwrap();
        let text = std::fs::read_to_string(&csv_fn).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("change,drug,gene,mutation,variant_type,variant_resistant"));
        assert!(lines[0].ends_with(",confidence"));
        assert!(lines[1].starts_with("added,isoniazid,Rv1908c,p.Ser315Thr,missense,8.5,0.5,2.5,10.5,"));
        assert!(lines[1].ends_with(",high"));
        assert!(lines[2].starts_with("removed,rifampicin,Rv0667,large_deletion,,0.5,"));

        let tsv_fn = tmp_dir.path().join("confidence.tsv");
        write_results_csv(&added, &removed, &tsv_fn).unwrap();
        let text = std::fs::read_to_string(&tsv_fn).unwrap();
        assert!(text.starts_with("change\tdrug\tgene"));
    }

    #[test]
    fn test_github_target() {
        let vars: HashMap<&str, &str> = [
            ("GH_AUTH_TOKEN", "secret"),
            ("CIRCLE_SHA1", "abc123"),
            ("CIRCLE_PULL_REQUEST", "https://github.com/jodyphelan/tbdb/pull/42")
        ].into_iter().collect();
        let target = GithubTarget::from_lookup(DEFAULT_GITHUB_REPO, |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(target.commit_sha, "abc123");
        assert_eq!(target.pull_request, Some(42));
        assert_eq!(target.comment_url(), "https://api.github.com/repos/jodyphelan/tbdb/commits/abc123/comments");

        // pull request is optional, token is not
        let target = GithubTarget::from_lookup("me/fork", |k| if k == "CIRCLE_PULL_REQUEST" { None } else { vars.get(k).map(|v| v.to_string()) }).unwrap();
        assert_eq!(target.pull_request, None);
        assert!(GithubTarget::from_lookup(DEFAULT_GITHUB_REPO, |k| if k == "GH_AUTH_TOKEN" { None } else { vars.get(k).map(|v| v.to_string()) }).is_err());
    }
}
