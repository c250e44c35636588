//! Common business categories for MCA applications. Free text is still
//! accepted for `business_type`; this table only backs pickers and grouping.

pub const BUSINESS_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Food & Beverage",
        &[
            "Restaurant",
            "Fast Food",
            "Café/Coffee Shop",
            "Bar/Tavern",
            "Catering Service",
            "Food Truck",
            "Bakery",
            "Pizza Shop",
        ],
    ),
    (
        "Retail",
        &[
            "Retail Store",
            "Convenience Store",
            "Grocery Store",
            "Clothing Store",
            "Electronics Store",
            "Auto Parts Store",
            "Jewelry Store",
            "Sporting Goods",
            "Beauty Supply",
            "Pet Store",
        ],
    ),
    (
        "Services",
        &[
            "Auto Repair",
            "Beauty Salon",
            "Barber Shop",
            "Spa/Wellness",
            "Dry Cleaning",
            "Laundromat",
            "Cleaning Service",
            "Landscaping",
            "Pest Control",
            "HVAC Service",
        ],
    ),
    (
        "Healthcare",
        &[
            "Medical Practice",
            "Dental Practice",
            "Veterinary Clinic",
            "Pharmacy",
            "Physical Therapy",
            "Chiropractic",
            "Mental Health",
            "Home Healthcare",
        ],
    ),
    (
        "Professional",
        &[
            "Legal Services",
            "Accounting",
            "Real Estate",
            "Insurance Agency",
            "Marketing Agency",
            "Consulting",
            "IT Services",
            "Web Design",
        ],
    ),
    (
        "Construction",
        &[
            "General Contractor",
            "Plumbing",
            "Electrical",
            "Roofing",
            "Flooring",
            "Painting",
            "Masonry",
            "Kitchen & Bath",
        ],
    ),
    (
        "Transportation",
        &[
            "Trucking",
            "Taxi/Rideshare",
            "Auto Sales",
            "Car Wash",
            "Gas Station",
            "Towing Service",
            "Delivery Service",
            "Moving Company",
        ],
    ),
    (
        "Other",
        &[
            "Gym/Fitness",
            "Entertainment Venue",
            "Event Planning",
            "Photography",
            "Travel Agency",
            "Hotel/Lodging",
            "Manufacturing",
            "Wholesale",
            "Distribution",
            "Printing",
            "Packaging",
            "E-commerce",
            "Online Business",
            "Franchise",
            "Non-Profit",
            "Other",
        ],
    ),
];

pub fn business_types() -> impl Iterator<Item = &'static str> {
    BUSINESS_CATEGORIES
        .iter()
        .flat_map(|(_, types)| types.iter().copied())
}

pub fn category_for(business_type: &str) -> Option<&'static str> {
    let wanted = business_type.trim();
    BUSINESS_CATEGORIES
        .iter()
        .find(|(_, types)| types.iter().any(|t| t.eq_ignore_ascii_case(wanted)))
        .map(|(category, _)| *category)
}

/// Canonical spelling of a known type, so `pizza shop` stores as `Pizza Shop`.
pub fn canonical_business_type(business_type: &str) -> Option<&'static str> {
    let wanted = business_type.trim();
    business_types().find(|t| t.eq_ignore_ascii_case(wanted))
}
