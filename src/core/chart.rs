use crate::core::money;
use serde_json::{Value, json};

/// Generates a Chart.js bar chart configuration for member balances,
/// attached to the close notification when the caller does not supply its
/// own snapshot. Display-only; amounts leave minor units here and nowhere
/// else in the ledger.
pub fn balance_chart(group_name: &str, labeled_balances: &[(String, i64)]) -> Value {
    let labels: Vec<&str> = labeled_balances.iter().map(|(name, _)| name.as_str()).collect();
    let data: Vec<f64> = labeled_balances
        .iter()
        .map(|(_, amount_minor)| money::to_major(*amount_minor))
        .collect();

    let base_colors = [
        (75, 192, 192),  // Teal
        (255, 99, 132),  // Red
        (54, 162, 235),  // Blue
        (255, 206, 86),  // Yellow
        (153, 102, 255), // Purple
    ];
    let mut background_colors = Vec::with_capacity(labels.len());
    let mut border_colors = Vec::with_capacity(labels.len());
    for i in 0..labels.len() {
        let (r, g, b) = base_colors[i % base_colors.len()];
        background_colors.push(format!("rgba({}, {}, {}, 0.6)", r, g, b));
        border_colors.push(format!("rgba({}, {}, {}, 1)", r, g, b));
    }

    json!({
        "type": "bar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Member Balances",
                "data": data,
                "backgroundColor": background_colors,
                "borderColor": border_colors,
                "borderWidth": 1
            }]
        },
        "options": {
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "title": { "display": true, "text": "Balance" }
                },
                "x": {
                    "title": { "display": true, "text": "Members" }
                }
            },
            "plugins": {
                "title": {
                    "display": true,
                    "text": format!("Balances for Group: {}", group_name)
                }
            }
        }
    })
}
