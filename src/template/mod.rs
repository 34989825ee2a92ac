//! Sample scripts dropped into a ghost environment.
//!
//! A handful of popular distributions get a short, offline-safe snippet.
//! Anything else falls back to a bare import line.

use crate::core::error::Result;
use crate::core::write_file;
use crate::python::{normalize_name, requirement_name};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTemplate {
    /// PEP 503 normalized distribution name.
    pub package: &'static str,
    /// Module the distribution installs.
    pub import: &'static str,
    pub body: &'static str,
}

const TEMPLATES: &[SampleTemplate] = &[
    SampleTemplate {
        package: "requests",
        import: "requests",
        body: r#"req = requests.Request("GET", "https://httpbin.org/get", params={"q": "ghostenv"})
prepared = req.prepare()
print("requests", requests.__version__, "->", prepared.url)"#,
    },
    SampleTemplate {
        package: "httpx",
        import: "httpx",
        body: r#"url = httpx.URL("https://example.org/search", params={"q": "ghostenv"})
print("httpx", httpx.__version__, "->", url)"#,
    },
    SampleTemplate {
        package: "numpy",
        import: "numpy",
        body: r#"arr = numpy.arange(12).reshape(3, 4)
print("numpy", numpy.__version__)
print(arr)
print("column sums:", arr.sum(axis=0))"#,
    },
    SampleTemplate {
        package: "pandas",
        import: "pandas",
        body: r#"df = pandas.DataFrame({"name": ["ada", "grace", "linus"], "score": [92, 88, 75]})
print("pandas", pandas.__version__)
print(df.describe())"#,
    },
    SampleTemplate {
        package: "matplotlib",
        import: "matplotlib",
        body: r#"matplotlib.use("Agg")
import matplotlib.pyplot as plt

fig, ax = plt.subplots()
ax.plot([0, 1, 2, 3], [0, 1, 4, 9])
fig.savefig("ghost_plot.png")
print("matplotlib", matplotlib.__version__, "-> wrote ghost_plot.png")"#,
    },
    SampleTemplate {
        package: "flask",
        import: "flask",
        body: r#"app = flask.Flask(__name__)


@app.route("/")
def index():
    return {"hello": "ghostenv"}


with app.test_client() as client:
    print("flask ->", client.get("/").get_json())"#,
    },
    SampleTemplate {
        package: "fastapi",
        import: "fastapi",
        body: r#"app = fastapi.FastAPI()


@app.get("/")
def index():
    return {"hello": "ghostenv"}


print("fastapi", fastapi.__version__, "routes:", [r.path for r in app.routes])"#,
    },
    SampleTemplate {
        package: "beautifulsoup4",
        import: "bs4",
        body: r#"soup = bs4.BeautifulSoup("<ul><li>ghost</li><li>env</li></ul>", "html.parser")
print("bs4 ->", [li.text for li in soup.find_all("li")])"#,
    },
    SampleTemplate {
        package: "pyyaml",
        import: "yaml",
        body: r#"doc = yaml.safe_load("name: ghostenv\ntags: [temp, venv]\n")
print("yaml ->", doc)
print(yaml.safe_dump(doc))"#,
    },
    SampleTemplate {
        package: "pillow",
        import: "PIL",
        body: r#"from PIL import Image

img = Image.new("RGB", (64, 64), color=(120, 80, 200))
print("Pillow", PIL.__version__, "->", img.size, img.mode)"#,
    },
    SampleTemplate {
        package: "scikit-learn",
        import: "sklearn",
        body: r#"from sklearn.datasets import load_iris
from sklearn.linear_model import LogisticRegression

X, y = load_iris(return_X_y=True)
model = LogisticRegression(max_iter=500).fit(X, y)
print("scikit-learn", sklearn.__version__, "accuracy:", model.score(X, y))"#,
    },
    SampleTemplate {
        package: "rich",
        import: "rich",
        body: r#"from rich.console import Console

Console().print("[bold magenta]ghostenv[/] says [green]hello[/]!")"#,
    },
    SampleTemplate {
        package: "click",
        import: "click",
        body: r#"@click.command()
@click.option("--name", default="ghost")
def hello(name):
    click.echo(f"hello {name}")


hello(["--name", "ghostenv"], standalone_mode=False)"#,
    },
    SampleTemplate {
        package: "pydantic",
        import: "pydantic",
        body: r#"class User(pydantic.BaseModel):
    name: str
    age: int


print("pydantic", pydantic.VERSION, "->", User(name="ghost", age="42"))"#,
    },
];

/// Canned sample for a distribution name, if one exists.
pub fn lookup(name: &str) -> Option<&'static SampleTemplate> {
    let wanted = normalize_name(name);
    TEMPLATES.iter().find(|t| t.package == wanted)
}

/// Best guess at the module a distribution installs.
pub fn import_name(name: &str) -> String {
    match lookup(name) {
        Some(template) => template.import.to_string(),
        None => name.replace(['-', '.'], "_"),
    }
}

/// Render the sample script for the requested packages.
pub fn render_sample_script(packages: &[String]) -> String {
    let mut names: Vec<String> = Vec::new();
    for name in packages.iter().filter_map(|p| requirement_name(p)) {
        if !names
            .iter()
            .any(|n| normalize_name(n) == normalize_name(&name))
        {
            names.push(name);
        }
    }

    let mut lines: Vec<String> = vec![
        "# Test script for ghostenv".to_string(),
        "# You can edit this file to test your packages.".to_string(),
        String::new(),
    ];

    for name in &names {
        lines.push(format!("import {}  # {}", import_name(name), name));
    }

    for template in names.iter().filter_map(|n| lookup(n)) {
        lines.push(String::new());
        lines.push(format!("# --- {} ---", template.package));
        lines.extend(template.body.lines().map(str::to_string));
    }

    lines.push(String::new());
    lines.push("# Add your test code below!".to_string());
    lines.push("print('Script setup complete.')".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub async fn write_sample_script(
    dir: &Path,
    script_name: &str,
    packages: &[String],
) -> Result<PathBuf> {
    let path = dir.join(script_name);
    write_file(&path, &render_sample_script(packages)).await?;

    println!(
        "{} Test script created at {}",
        "✓".green().bold(),
        path.display().to_string().yellow()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_package_gets_its_template() {
        let script = render_sample_script(&["pandas==2.2.3".to_string()]);
        let template = lookup("pandas").unwrap();

        assert!(script.contains("import pandas  # pandas"));
        assert!(script.contains(template.body));
        assert!(script.ends_with("print('Script setup complete.')\n"));
    }

    #[test]
    fn lookup_uses_normalized_names() {
        assert_eq!(lookup("Scikit_Learn").unwrap().import, "sklearn");
        assert_eq!(lookup("PyYAML").unwrap().import, "yaml");
        assert!(lookup("left-pad").is_none());
    }

    #[test]
    fn unknown_package_falls_back_to_import() {
        let script = render_sample_script(&["python-dateutil".to_string()]);

        assert!(script.contains("import python_dateutil  # python-dateutil"));
        assert!(!script.contains("# --- "));
    }

    #[test]
    fn import_names_differ_from_distribution_names() {
        let script = render_sample_script(&[
            "beautifulsoup4".to_string(),
            "Pillow>=10".to_string(),
        ]);
        assert!(script.contains("import bs4  # beautifulsoup4"));
        assert!(script.contains("import PIL  # Pillow"));
    }

    #[test]
    fn nameless_requirements_produce_no_imports() {
        let script = render_sample_script(&["git+https://github.com/psf/requests".to_string()]);
        assert!(!script.contains("import "));
        assert!(script.starts_with("# Test script for ghostenv\n"));
    }

    #[test]
    fn local_archives_produce_no_imports() {
        let script = render_sample_script(&[
            "dist/mypkg-1.0-py3-none-any.whl".to_string(),
            "mypkg-1.0.tar.gz".to_string(),
        ]);
        assert!(!script.contains("import "));
    }

    #[test]
    fn duplicate_requests_import_once() {
        let script = render_sample_script(&["requests".to_string(), "Requests==2.32".to_string()]);
        assert_eq!(script.matches("import requests").count(), 1);
        assert_eq!(script.matches("# --- requests ---").count(), 1);
    }

    #[test]
    fn every_template_is_keyed_by_normalized_name() {
        for template in TEMPLATES {
            assert_eq!(normalize_name(template.package), template.package);
        }
    }

    #[tokio::test]
    async fn sample_script_is_written_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_script(dir.path(), "ghost_test.py", &["numpy".to_string()])
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("ghost_test.py"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, render_sample_script(&["numpy".to_string()]));
        assert!(content.contains(lookup("numpy").unwrap().body));
    }
}
