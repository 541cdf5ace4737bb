//! Default chart of accounts loaded when no tree file is configured.

use crate::domain::{DomainResult, Edge, Node, Position, TreeStore};

const NODES: &[(&str, f64, f64, &str)] = &[
    ("root", 1200.0, 50.0, "Main accounts"),
    // assets
    ("assets", 950.0, 150.0, "Current assets"),
    ("cash", 700.0, 80.0, "Cash"),
    ("bank", 700.0, 150.0, "Bank"),
    ("shortInvest", 700.0, 220.0, "Other short-term receivables"),
    // liabilities
    ("liabilities", 950.0, 330.0, "Current liabilities"),
    ("payable", 700.0, 330.0, "Trade payables"),
    ("tax", 450.0, 280.0, "Tax payable"),
    ("insurance", 450.0, 330.0, "Insurance payable"),
    ("salary", 450.0, 380.0, "Salaries payable"),
    // income
    ("income", 950.0, 520.0, "Income"),
    ("operIncome", 700.0, 470.0, "Operating income"),
    ("nonOperIncome", 700.0, 550.0, "Non-operating income"),
    ("sales", 450.0, 450.0, "Sales revenue"),
    ("service", 450.0, 500.0, "Service revenue"),
    // expenses
    ("expense", 950.0, 720.0, "Expenses"),
    ("adminExpense", 700.0, 720.0, "Administrative expenses"),
    ("rent", 450.0, 680.0, "Rent"),
    ("salaryExp", 450.0, 730.0, "Salaries"),
    ("insuranceExp", 450.0, 780.0, "Insurance"),
];

const EDGES: &[(&str, &str)] = &[
    ("root", "assets"),
    ("assets", "cash"),
    ("assets", "bank"),
    ("assets", "shortInvest"),
    ("root", "liabilities"),
    ("liabilities", "payable"),
    ("liabilities", "tax"),
    ("liabilities", "insurance"),
    ("liabilities", "salary"),
    ("root", "income"),
    ("income", "operIncome"),
    ("income", "nonOperIncome"),
    ("operIncome", "sales"),
    ("operIncome", "service"),
    ("root", "expense"),
    ("expense", "adminExpense"),
    ("adminExpense", "rent"),
    ("adminExpense", "salaryExp"),
    ("adminExpense", "insuranceExp"),
];

/// Nodes of the default chart. Edge ids are `<source>-<target>`.
pub fn chart_of_accounts_parts() -> (Vec<Node>, Vec<Edge>) {
    let nodes = NODES
        .iter()
        .map(|&(id, x, y, label)| Node::new(id, Position::new(x, y), label))
        .collect();
    let edges = EDGES
        .iter()
        .map(|&(source, target)| Edge::new(format!("{source}-{target}"), source, target))
        .collect();
    (nodes, edges)
}

/// The default chart as a validated store.
pub fn chart_of_accounts() -> DomainResult<TreeStore> {
    let (nodes, edges) = chart_of_accounts_parts();
    TreeStore::from_parts(nodes, edges)
}
