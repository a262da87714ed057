use chrono::{DateTime, SecondsFormat, Utc};
use facility_core::{DirectoryViewModel, ProviderCard, SubCategoryChip};

pub const NO_PARTNERS: &str = "No partners found.";
pub const NO_CATEGORY: &str = "No category selected.";

/// Plain-text listing of the directory, one entry per output line.
pub fn render(view: &DirectoryViewModel, generated_at: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![format!(
        "Facility directory ({})",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )];

    if !view.categories.is_empty() {
        let tabs: Vec<String> = view
            .categories
            .iter()
            .map(|category| {
                let active = view.active_category_id.as_ref() == Some(&category.id);
                mark_active(&category.name, active)
            })
            .collect();
        lines.push(format!("Categories: {}", tabs.join(" ")));
    }

    match view.active_category_name() {
        Some(name) => lines.push(format!("== {name} ==")),
        None => {
            lines.push(NO_CATEGORY.to_string());
            return lines;
        }
    }

    let chips: Vec<String> = view
        .subcategory_chips()
        .iter()
        .map(format_chip)
        .collect();
    lines.push(format!("Filters: {}", chips.join(" ")));
    lines.push(String::new());

    if view.providers.is_empty() {
        lines.push(NO_PARTNERS.to_string());
        return lines;
    }
    for (index, card) in view.providers.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(format_card(card));
    }
    lines
}

fn mark_active(label: &str, active: bool) -> String {
    if active {
        format!("[{label}]")
    } else {
        label.to_string()
    }
}

fn format_chip(chip: &SubCategoryChip) -> String {
    mark_active(&format!("{} ({})", chip.name, chip.count), chip.active)
}

fn format_card(card: &ProviderCard) -> Vec<String> {
    let reviews = match card.review_count {
        1 => "1 review".to_string(),
        count => format!("{count} reviews"),
    };
    vec![
        format!("{}  rating {:.1} ({})", card.name, card.rating, reviews),
        format!("  {}", card.provider_type),
        format!("  {}", card.address),
        format!("  {}", card.image_url),
    ]
}
