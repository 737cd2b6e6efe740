//! Markup-string rendering contracts.
//!
//! Synchronous functions from domain records to HTML fragments. Only class
//! hooks are emitted; styling and layout belong to the embedding layer.

use reloc_core::{Hospital, Tier, Vendor};

/// Minimal HTML escaping for interpolated record fields.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn tier_badge(tier: Tier) -> String {
    match tier {
        Tier::Premium => r#"<div class="service-badge premium">Premium</div>"#.to_owned(),
        Tier::Featured => r#"<div class="service-badge featured">Featured</div>"#.to_owned(),
        Tier::Basic => String::new(),
    }
}

/// Directory card: category chip, name, description, coverage, contact
/// actions.
#[must_use]
pub fn vendor_card(vendor: &Vendor) -> String {
    let website_action = vendor.website.as_deref().map_or_else(String::new, |url| {
        format!(r#"<button class="btn-contact" data-url="{}">Visit Website</button>"#, escape(url))
    });
    let phone_action = vendor.phone_number.as_deref().map_or_else(String::new, |phone| {
        format!(r#"<button class="btn-phone" data-tel="{}">Call Now</button>"#, escape(phone))
    });

    format!(
        r#"<div class="vendor-card" data-vendor-id="{id}">
  <div class="vendor-category">{category}</div>
  <h3 class="vendor-name">{name}</h3>
  <p class="vendor-description">{description}</p>
  <div class="vendor-coverage"><span class="vendor-location">{location}</span></div>
  <div class="vendor-actions">{website_action}{phone_action}</div>
</div>"#,
        id = escape(&vendor.id),
        category = escape(&vendor.service_category),
        name = escape(&vendor.business_name),
        description = escape(&vendor.description),
        location = escape(&vendor.location),
    )
}

/// Search-result card with tier badge, price, rating, and location.
#[must_use]
pub fn service_card(vendor: &Vendor) -> String {
    format!(
        r#"<div class="service-card" data-vendor-id="{id}">
  <div class="service-image">{badge}</div>
  <div class="service-content">
    <h3 class="service-title">{name}</h3>
    <p class="service-description">{description}</p>
    <div class="service-price">{price}</div>
    <div class="service-rating"><span class="rating-value">{rating}</span><span class="service-location">{location}</span></div>
  </div>
</div>"#,
        id = escape(&vendor.id),
        badge = tier_badge(vendor.tier),
        name = escape(&vendor.business_name),
        description = escape(&vendor.description),
        price = escape(&vendor.price_range),
        rating = vendor.rating,
        location = escape(&vendor.location),
    )
}

/// Full results grid, or the empty-state block when nothing matched.
#[must_use]
pub fn search_results(vendors: &[Vendor]) -> String {
    if vendors.is_empty() {
        return r#"<div class="empty-state">
  <h3>No services found</h3>
  <p>Try adjusting your search criteria or browse by category above.</p>
</div>"#
            .to_owned();
    }
    vendors.iter().map(service_card).collect::<Vec<_>>().join("\n")
}

/// NHS trust card for the home view.
#[must_use]
pub fn trust_card(hospital: &Hospital) -> String {
    format!(
        r#"<div class="trust-card" data-trust-id="{id}">
  <div class="trust-badge">NHS Partner</div>
  <h3 class="trust-name">{name}</h3>
  <div class="trust-location">{location}</div>
  <div class="trust-stats"><span class="trust-rating">{rating}</span><span>{hospitals} Hospitals</span></div>
  <div class="trust-services">{services} services available</div>
</div>"#,
        id = escape(&hospital.id),
        name = escape(&hospital.name),
        location = escape(&hospital.location),
        rating = hospital.rating,
        hospitals = hospital.hospitals,
        services = hospital.services,
    )
}

#[must_use]
pub fn trust_grid(hospitals: &[Hospital]) -> String {
    hospitals.iter().map(trust_card).collect::<Vec<_>>().join("\n")
}

/// Detail-modal body: category/tier/rating header, description, pricing,
/// location, features, contact lines.
#[must_use]
pub fn service_detail(vendor: &Vendor) -> String {
    let features = if vendor.features.is_empty() {
        String::new()
    } else {
        let items: String = vendor
            .features
            .iter()
            .map(|f| format!("<li>{}</li>", escape(f)))
            .collect();
        format!("<h4>Features</h4>\n<ul class=\"feature-list\">{items}</ul>\n")
    };

    let mut contact_lines = String::new();
    for (class, value) in [
        ("contact-whatsapp", vendor.whatsapp_number.as_deref()),
        ("contact-phone", vendor.phone_number.as_deref()),
        ("contact-email", vendor.email.as_deref()),
        ("contact-website", vendor.website.as_deref()),
    ] {
        if let Some(value) = value {
            contact_lines.push_str(&format!(
                "<p class=\"{class}\">{}</p>\n",
                escape(value)
            ));
        }
    }

    format!(
        r#"<div class="service-details">
  <div class="service-meta">
    <span class="service-category">{category}</span>
    <span class="service-tier tier-{tier}">{tier_upper}</span>
    <span class="service-rating">{rating} rating</span>
  </div>
  <h4>Service Description</h4>
  <p>{description}</p>
  <h4>Pricing</h4>
  <div class="pricing-info"><span class="price">{price}</span></div>
  <h4>Location</h4>
  <p>{location}</p>
  {features}<h4>Contact Information</h4>
  <div class="contact-info">{contacts}</div>
</div>"#,
        category = escape(&vendor.service_category),
        tier = vendor.tier,
        tier_upper = vendor.tier.to_string().to_uppercase(),
        rating = vendor.rating,
        description = escape(&vendor.description),
        price = escape(&vendor.price_range),
        location = escape(&vendor.location),
        features = features,
        contacts = contact_lines,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> Vendor {
        Vendor {
            id: "safestay".to_owned(),
            business_name: "SafeStay Housing Ltd".to_owned(),
            service_category: "Housing".to_owned(),
            description: "Modern 2-bed flat, 10 min from Royal London Hospital".to_owned(),
            price_range: "£600-1200/month".to_owned(),
            location: "Central London".to_owned(),
            rating: 4.8,
            tier: Tier::Premium,
            whatsapp_number: Some("+447700123456".to_owned()),
            phone_number: Some("+442071234567".to_owned()),
            email: None,
            website: Some("https://safestay.example".to_owned()),
            features: vec!["NHS Verified".to_owned(), "Bills included".to_owned()],
            is_active: true,
        }
    }

    #[test]
    fn service_card_carries_badge_rating_and_location() {
        let html = service_card(&vendor());
        assert!(html.contains(r#"data-vendor-id="safestay""#));
        assert!(html.contains(r#"<div class="service-badge premium">Premium</div>"#));
        assert!(html.contains("SafeStay Housing Ltd"));
        assert!(html.contains("4.8"));
        assert!(html.contains("Central London"));
    }

    #[test]
    fn basic_tier_renders_no_badge() {
        let mut v = vendor();
        v.tier = Tier::Basic;
        assert!(!service_card(&v).contains("service-badge"));
    }

    #[test]
    fn empty_results_render_the_empty_state() {
        let html = search_results(&[]);
        assert!(html.contains("No services found"));
        assert!(html.contains("Try adjusting your search criteria"));
    }

    #[test]
    fn results_render_one_card_per_vendor() {
        let html = search_results(&[vendor(), vendor()]);
        assert_eq!(html.matches("service-card").count(), 2);
        assert!(!html.contains("No services found"));
    }

    #[test]
    fn record_fields_are_escaped() {
        let mut v = vendor();
        v.business_name = "Flats <script>alert(1)</script> & Co".to_owned();
        let html = service_card(&v);
        assert!(html.contains("Flats &lt;script&gt;alert(1)&lt;/script&gt; &amp; Co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn detail_body_lists_features_and_contacts() {
        let html = service_detail(&vendor());
        assert!(html.contains("tier-premium"));
        assert!(html.contains("PREMIUM"));
        assert!(html.contains("<li>NHS Verified</li>"));
        assert!(html.contains("+447700123456"));
        assert!(!html.contains("contact-email"), "absent fields render nothing");
    }

    #[test]
    fn vendor_card_omits_actions_for_missing_contacts() {
        let mut v = vendor();
        v.website = None;
        v.phone_number = None;
        let html = vendor_card(&v);
        assert!(!html.contains("btn-contact"));
        assert!(!html.contains("btn-phone"));
    }

    #[test]
    fn trust_card_shows_the_partner_badge_and_counts() {
        let hospital = Hospital {
            id: "guys".to_owned(),
            name: "Guy's and St Thomas'".to_owned(),
            trust: "Guy's and St Thomas' NHS Foundation Trust".to_owned(),
            location: "Central London".to_owned(),
            rating: 4.8,
            hospitals: 3,
            services: 428,
        };
        let html = trust_card(&hospital);
        assert!(html.contains("NHS Partner"));
        assert!(html.contains("Guy's and St Thomas'"));
        assert!(html.contains("3 Hospitals"));
        assert!(html.contains("428 services available"));
    }
}
