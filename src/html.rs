use crate::error::Result;
use crate::model::FileStat;
use crate::report;

/// Self-contained preview page: the serialized report embedded in a
/// script context plus a chart.js chart. The chart re-sorts by total
/// churn descending on the client; the persisted ranking is untouched.
pub fn render(report: &[FileStat]) -> Result<String> {
    let payload = embed_json(report)?;
    Ok(PAGE_TEMPLATE.replace(DATA_MARKER, &payload))
}

/// JSON-encode the payload for a `<script>` context. `<` is escaped to
/// `\u003c` so a path like `</script><script>` can never terminate the
/// surrounding script element.
fn embed_json(report: &[FileStat]) -> Result<String> {
    Ok(report::serialize(report)?.replace('<', "\\u003c"))
}

const DATA_MARKER: &str = "__CHURN_DATA__";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>churnscope</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@4.0.0/dist/css/bootstrap.min.css">
</head>
<body>
<div class="container-fluid">
  <h1 class="display-3">churnscope</h1>
  <h2 class="display-4">
    Download your results (in json format):
    <button id="download" class="btn btn-primary">Download</button>
  </h2>
  <canvas id="churnChart"></canvas>
</div>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<script>
  const fullData = __CHURN_DATA__;

  document.getElementById('download').addEventListener('click', function () {
    const href =
      'data:text/json;charset=utf-8,' +
      encodeURIComponent(JSON.stringify(fullData));
    const anchor = document.createElement('a');
    anchor.setAttribute('href', href);
    anchor.setAttribute('download', 'churnscope-results.json');
    document.body.appendChild(anchor);
    anchor.click();
    anchor.remove();
  });

  const fileData = fullData.map(([file, stats]) => ({
    file,
    additions: stats.additions,
    deletions: stats.deletions
  }));

  // Presentation-only re-sort by total churn; the artifact keeps the
  // commit-count ranking.
  fileData.sort(
    (a, b) => b.additions + b.deletions - a.additions - a.deletions
  );

  new Chart(document.getElementById('churnChart'), {
    type: 'line',
    data: {
      labels: fileData.map((entry) => entry.file),
      datasets: [
        {
          label: 'Additions',
          backgroundColor: '#36a2ea',
          borderColor: '#36a2ea',
          borderWidth: 1,
          data: fileData.map((entry) => entry.additions)
        },
        {
          label: 'Deletions',
          backgroundColor: '#f66384',
          borderColor: '#f66384',
          borderWidth: 1,
          data: fileData.map((entry) => entry.deletions)
        }
      ]
    },
    options: {
      responsive: true,
      maintainAspectRatio: true,
      plugins: {
        title: {
          display: true,
          text: 'churnscope - recent per-file churn'
        }
      }
    }
  });
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(path: &str, additions: u64, deletions: u64, commit_count: u32) -> FileStat {
        FileStat {
            path: path.to_string(),
            additions,
            deletions,
            commit_count,
        }
    }

    #[test]
    fn embeds_the_serialized_report() {
        let page = render(&[stat("src/main.rs", 3, 1, 2)]).unwrap();
        assert!(page.contains(r#"["src/main.rs",{"additions":3,"deletions":1,"commitCount":2}]"#));
        assert!(!page.contains(DATA_MARKER));
    }

    #[test]
    fn hostile_paths_cannot_break_out_of_the_script_context() {
        let page = render(&[stat("</script><script>alert(1)//", 1, 0, 1)]).unwrap();
        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains("\\u003c/script>\\u003cscript>alert(1)//"));
    }

    #[test]
    fn empty_report_renders_an_empty_collection() {
        let page = render(&[]).unwrap();
        assert!(page.contains("const fullData = [];"));
    }
}
