//! The plain-text configuration file: `key = value` pairs, `#` comments,
//! case-insensitive keys, and the two term-list blocks
//! `structParams = { ... }` / `attrParams = { ... }`.

use crate::from_pajek::*;
use crate::graph::Graph;
use crate::model::{parse_term, Model, Term, TermKind};
use crate::two_paths::TwoPathCacheKind;
use crate::types::*;
use hashbrown::HashMap;
use log::info;

/// One entry of a term block: the term expression and, for simulation
/// configs, its fixed parameter value.
#[derive(Clone, Debug)]
pub struct TermEntry {
    pub expression: String,
    pub value: Option<f64>,
}

/// Parsed configuration with defaults applied.
#[derive(Clone, Debug)]
pub struct Config {
    pub is_directed: bool,
    pub is_bipartite: bool,
    pub citation_ergm: bool,
    pub num_nodes: Option<NodeT>,
    pub num_nodes_a: Option<NodeT>,
    pub num_arcs: Option<EdgeT>,
    pub use_tnt_sampler: bool,
    pub use_ifd_sampler: bool,
    pub use_borisenko_update: bool,
    pub sampler_steps: u64,
    pub s_steps: u64,
    pub ee_steps: u64,
    pub ee_inner_steps: u64,
    pub sample_size: u64,
    pub interval: u64,
    pub burnin: u64,
    pub aca_s: f64,
    pub aca_ee: f64,
    pub comp_c: f64,
    pub ifd_k: f64,
    pub learning_rate: f64,
    pub min_theta: f64,
    pub arclist_file: Option<String>,
    pub binattr_file: Option<String>,
    pub catattr_file: Option<String>,
    pub contattr_file: Option<String>,
    pub period_file: Option<String>,
    pub fixed_nodes_file: Option<String>,
    pub output_file_prefix: String,
    pub sim_net_file_prefix: String,
    pub sim_stats_file: String,
    pub two_path_cache: TwoPathCacheKind,
    pub seed: Option<u64>,
    pub struct_params: Vec<TermEntry>,
    pub attr_params: Vec<TermEntry>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            is_directed: false,
            is_bipartite: false,
            citation_ergm: false,
            num_nodes: None,
            num_nodes_a: None,
            num_arcs: None,
            use_tnt_sampler: false,
            use_ifd_sampler: false,
            use_borisenko_update: true,
            sampler_steps: 1000,
            s_steps: 100,
            ee_steps: 500,
            ee_inner_steps: 1,
            sample_size: 100,
            interval: 1000,
            burnin: 10000,
            aca_s: 0.1,
            aca_ee: 1e-9,
            comp_c: 1e-2,
            ifd_k: 0.1,
            learning_rate: 1e-3,
            min_theta: 1e-2,
            arclist_file: None,
            binattr_file: None,
            catattr_file: None,
            contattr_file: None,
            period_file: None,
            fixed_nodes_file: None,
            output_file_prefix: "estimation".to_string(),
            sim_net_file_prefix: "simulation".to_string(),
            sim_stats_file: "simulation_stats.txt".to_string(),
            two_path_cache: TwoPathCacheKind::Hash,
            seed: None,
            struct_params: Vec::new(),
            attr_params: Vec::new(),
        }
    }
}

impl Config {
    /// Read and parse the configuration file.
    pub fn load(path: &str) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot open {}: {}.", path, e))?;
        Config::parse(&text, path)
    }

    pub fn parse(text: &str, path: &str) -> Result<Config> {
        let mut raw: HashMap<String, (String, usize)> = HashMap::new();
        let mut lines = text.lines().enumerate();
        while let Some((number, line)) = lines.next() {
            let stripped = strip_comment(line);
            if stripped.trim().is_empty() {
                continue;
            }
            let (key, mut value) = match stripped.split_once('=') {
                Some((key, value)) => (key.trim().to_lowercase(), value.trim().to_string()),
                None => {
                    return Err(format!(
                        "{}:{}: expected key = value, found {}.",
                        path,
                        number + 1,
                        stripped.trim()
                    ))
                }
            };
            if value.starts_with('{') {
                // A term block may span several lines up to its brace.
                while !value.contains('}') {
                    match lines.next() {
                        Some((_, continuation)) => {
                            value.push(' ');
                            value.push_str(strip_comment(continuation).trim());
                        }
                        None => {
                            return Err(format!(
                                "{}:{}: unterminated block for {}.",
                                path,
                                number + 1,
                                key
                            ))
                        }
                    }
                }
            }
            if raw.insert(key.clone(), (value, number + 1)).is_some() {
                return Err(format!("{}:{}: duplicate key {}.", path, number + 1, key));
            }
        }
        Config::from_raw(raw, path)
    }

    fn from_raw(mut raw: HashMap<String, (String, usize)>, path: &str) -> Result<Config> {
        let mut config = Config::default();
        let mut take = |key: &str| raw.remove(key);
        macro_rules! scalar {
            ($key:expr, $field:ident, $kind:literal) => {
                if let Some((value, line)) = take($key) {
                    config.$field = value.parse().map_err(|e| {
                        format!("{}:{}: invalid {} for {}: {}.", path, line, $kind, $key, e)
                    })?;
                }
            };
        }
        macro_rules! optional {
            ($key:expr, $field:ident, $kind:literal) => {
                if let Some((value, line)) = take($key) {
                    config.$field = Some(value.parse().map_err(|e| {
                        format!("{}:{}: invalid {} for {}: {}.", path, line, $kind, $key, e)
                    })?);
                }
            };
        }
        macro_rules! boolean {
            ($key:expr, $field:ident) => {
                if let Some((value, line)) = take($key) {
                    config.$field = match value.to_lowercase().as_str() {
                        "true" | "1" => true,
                        "false" | "0" => false,
                        _ => {
                            return Err(format!(
                                "{}:{}: invalid boolean for {}: {}.",
                                path, line, $key, value
                            ))
                        }
                    };
                }
            };
        }
        macro_rules! filename {
            ($key:expr, $field:ident) => {
                if let Some((value, _)) = take($key) {
                    config.$field = Some(value);
                }
            };
        }
        boolean!("isdirected", is_directed);
        boolean!("isbipartite", is_bipartite);
        boolean!("citationergm", citation_ergm);
        boolean!("usetntsampler", use_tnt_sampler);
        boolean!("useifdsampler", use_ifd_sampler);
        boolean!("useborisenkoupdate", use_borisenko_update);
        optional!("numnodes", num_nodes, "node count");
        optional!("numnodesa", num_nodes_a, "node count");
        optional!("numarcs", num_arcs, "edge count");
        scalar!("samplersteps", sampler_steps, "iteration count");
        scalar!("ssteps", s_steps, "iteration count");
        scalar!("eesteps", ee_steps, "iteration count");
        scalar!("eeinnersteps", ee_inner_steps, "iteration count");
        scalar!("samplesize", sample_size, "sample count");
        scalar!("interval", interval, "iteration count");
        scalar!("burnin", burnin, "iteration count");
        scalar!("aca_s", aca_s, "number");
        scalar!("aca_ee", aca_ee, "number");
        scalar!("compc", comp_c, "number");
        scalar!("ifd_k", ifd_k, "number");
        scalar!("learningrate", learning_rate, "number");
        scalar!("mintheta", min_theta, "number");
        optional!("seed", seed, "seed");
        filename!("arclistfile", arclist_file);
        filename!("binattrfile", binattr_file);
        filename!("catattrfile", catattr_file);
        filename!("contattrfile", contattr_file);
        filename!("periodfile", period_file);
        filename!("fixednodesfile", fixed_nodes_file);
        if let Some((value, _)) = take("outputfileprefix") {
            config.output_file_prefix = value;
        }
        if let Some((value, _)) = take("simnetfileprefix") {
            config.sim_net_file_prefix = value;
        }
        if let Some((value, _)) = take("simstatsfile") {
            config.sim_stats_file = value;
        }
        if let Some((value, line)) = take("twopathcache") {
            config.two_path_cache = TwoPathCacheKind::from_name(&value)
                .map_err(|e| format!("{}:{}: {}", path, line, e))?;
        }
        if let Some((value, line)) = take("structparams") {
            config.struct_params = parse_term_block(&value)
                .map_err(|e| format!("{}:{}: {}", path, line, e))?;
        }
        if let Some((value, line)) = take("attrparams") {
            config.attr_params = parse_term_block(&value)
                .map_err(|e| format!("{}:{}: {}", path, line, e))?;
        }
        if let Some((key, (_, line))) = raw.iter().next() {
            return Err(format!("{}:{}: unknown key {}.", path, line, key));
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.use_tnt_sampler && self.use_ifd_sampler {
            return Err("useTNTsampler and useIFDsampler are mutually exclusive.".to_string());
        }
        if self.is_bipartite && self.is_directed {
            return Err("Bipartite networks must be undirected.".to_string());
        }
        if self.citation_ergm {
            if !self.is_directed {
                return Err("citationERGM requires a directed network.".to_string());
            }
            if self.period_file.is_none() {
                return Err("citationERGM requires a periodFile.".to_string());
            }
            if self.fixed_nodes_file.is_some() {
                return Err(
                    "citationERGM and fixedNodesFile cannot be combined.".to_string()
                );
            }
        }
        if self.struct_params.is_empty() && self.attr_params.is_empty() {
            return Err("The model has no terms: both structParams and attrParams are empty."
                .to_string());
        }
        Ok(())
    }

    /// Build the graph skeleton: nodes, attributes, periods and fixed
    /// flags attached, edges returned separately so the caller can insert
    /// them under an observed-statistics callback.
    pub fn build_graph(&self) -> Result<(Graph, Vec<(NodeT, NodeT)>)> {
        let (nodes_number, mode_a, edges) = match &self.arclist_file {
            Some(file) => {
                let network = read_pajek(file)?;
                if network.directed != self.is_directed {
                    return Err(format!(
                        "{} holds {} but the configuration says {}.",
                        file,
                        if network.directed { "*arcs" } else { "*edges" },
                        if self.is_directed {
                            "isDirected = true"
                        } else {
                            "isDirected = false"
                        }
                    ));
                }
                if let Some(expected) = self.num_nodes {
                    if expected != network.nodes_number {
                        return Err(format!(
                            "{} declares {} nodes but numNodes is {}.",
                            file, network.nodes_number, expected
                        ));
                    }
                }
                let mode_a = match (self.is_bipartite, network.mode_a_number, self.num_nodes_a) {
                    (false, _, _) => None,
                    (true, Some(mode_a), _) => Some(mode_a),
                    (true, None, Some(mode_a)) => Some(mode_a),
                    (true, None, None) => {
                        return Err(format!(
                            "isBipartite is set but neither {} nor numNodesA gives the mode split.",
                            file
                        ))
                    }
                };
                (network.nodes_number, mode_a, network.edges)
            }
            None => {
                let nodes_number = self
                    .num_nodes
                    .ok_or_else(|| "numNodes is required without an arclistFile.".to_string())?;
                let mode_a = if self.is_bipartite {
                    Some(self.num_nodes_a.ok_or_else(|| {
                        "numNodesA is required for a bipartite network without an arclistFile."
                            .to_string()
                    })?)
                } else {
                    None
                };
                (nodes_number, mode_a, Vec::new())
            }
        };
        let mut graph = Graph::new(nodes_number, self.is_directed, mode_a, self.two_path_cache)?;
        let mut attributes = crate::attributes::Attributes::new();
        if let Some(file) = &self.binattr_file {
            attributes.binary = read_binary_attributes(file, nodes_number)?;
        }
        if let Some(file) = &self.catattr_file {
            attributes.categorical = read_categorical_attributes(file, nodes_number)?;
        }
        if let Some(file) = &self.contattr_file {
            attributes.continuous = read_continuous_attributes(file, nodes_number)?;
        }
        graph.set_attributes(attributes)?;
        if self.citation_ergm {
            let file = self.period_file.as_ref().unwrap();
            graph.set_periods(read_periods(file, nodes_number)?)?;
        }
        if let Some(file) = &self.fixed_nodes_file {
            graph.set_fixed_nodes(&read_fixed_nodes(file, nodes_number)?)?;
        }
        info!(
            "Built {} {} graph skeleton on {} nodes, {} edges pending.",
            if self.is_directed {
                "directed"
            } else {
                "undirected"
            },
            if self.is_bipartite {
                "bipartite"
            } else {
                "one-mode"
            },
            nodes_number,
            edges.len()
        );
        Ok((graph, edges))
    }

    /// Resolve the term blocks against the graph's attribute tables.
    /// Returns the model and the initial theta (zero where no value was
    /// given).
    pub fn build_model(&self, graph: &Graph) -> Result<(Model, Vec<f64>)> {
        let mut terms = Vec::new();
        let mut labels = Vec::new();
        let mut theta = Vec::new();
        for entry in &self.struct_params {
            let term = parse_term(&entry.expression, graph)?;
            if term.kind() != TermKind::Structural {
                return Err(format!(
                    "{} is not a structural term; move it to attrParams.",
                    entry.expression
                ));
            }
            push_term(&mut terms, &mut labels, &mut theta, term, entry)?;
        }
        for entry in &self.attr_params {
            let term = parse_term(&entry.expression, graph)?;
            if term.kind() == TermKind::Structural {
                return Err(format!(
                    "{} is a structural term; move it to structParams.",
                    entry.expression
                ));
            }
            push_term(&mut terms, &mut labels, &mut theta, term, entry)?;
        }
        Ok((Model::new(terms, labels), theta))
    }

    /// Whether every term carries a fixed value, as simulation requires.
    pub fn theta_fully_specified(&self) -> bool {
        self.struct_params
            .iter()
            .chain(self.attr_params.iter())
            .all(|entry| entry.value.is_some())
    }
}

fn push_term(
    terms: &mut Vec<Term>,
    labels: &mut Vec<String>,
    theta: &mut Vec<f64>,
    term: Term,
    entry: &TermEntry,
) -> Result<()> {
    if terms.contains(&term) {
        return Err(format!("Duplicate model term {}.", entry.expression));
    }
    terms.push(term);
    labels.push(entry.expression.split_whitespace().collect());
    theta.push(entry.value.unwrap_or(0.0));
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(position) => &line[..position],
        None => line,
    }
}

/// Split a `{ ... }` block into term entries at top-level commas,
/// honouring parenthesised argument lists, each entry an expression with
/// an optional `= value` suffix.
fn parse_term_block(block: &str) -> Result<Vec<TermEntry>> {
    let trimmed = block.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| format!("Expected a {{ ... }} block, found {}.", trimmed))?;
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for character in inner.chars() {
        match character {
            '(' => {
                depth += 1;
                current.push(character);
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("Unbalanced parentheses in {}.", trimmed))?;
                current.push(character);
            }
            ',' if depth == 0 => {
                entries.push(current.clone());
                current.clear();
            }
            _ => current.push(character),
        }
    }
    if depth != 0 {
        return Err(format!("Unbalanced parentheses in {}.", trimmed));
    }
    entries.push(current);
    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((expression, value)) => Ok(TermEntry {
                expression: expression.trim().to_string(),
                value: Some(value.trim().parse().map_err(|e| {
                    format!("Invalid parameter value in {}: {}.", entry, e)
                })?),
            }),
            None => Ok(TermEntry {
                expression: entry,
                value: None,
            }),
        })
        .collect()
}
