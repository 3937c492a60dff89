use foundation::{LatLng, PlaceId};

use crate::{Category, Place};

type Row = (u32, &'static str, &'static str, f64, f64, &'static str);

#[rustfmt::skip]
const TOURIST_SPOTS: &[Row] = &[
    (1, "Dassam Falls", "A scenic waterfall near Ranchi, perfect for nature lovers.", 23.1896, 85.5046, "/assets/images/dassam.jpg"),
    (2, "Netarhat", "Beautiful hill station with stunning sunsets and panoramic views.", 23.4833, 84.2667, "/assets/images/netarhat.jpg"),
    (3, "Hundru Falls", "One of the most spectacular waterfalls in Jharkhand.", 23.4500, 85.6500, "/assets/images/hundru.jpg"),
    (4, "Jonha Falls", "Also known as Gautamdhara, surrounded by lush green forests.", 23.3417, 85.6083, "/assets/images/jonha.jpg"),
];

#[rustfmt::skip]
const WILDLIFE: &[Row] = &[
    (5, "Betla National Park", "Famous tiger reserve with diverse wildlife including elephants.", 23.8878, 84.1901, "/assets/images/betla.jpg"),
    (6, "Palamau Tiger Reserve", "One of the first tiger reserves in India, home to Bengal tigers.", 23.68889, 84.24889, "/assets/images/palamau.jpg"),
    (7, "Dalma Wildlife Sanctuary", "Famous for its elephant population and located near Jamshedpur.", 22.8567, 86.1167, "/assets/images/dalma.jpg"),
];

#[rustfmt::skip]
const HIDDEN_GEMS: &[Row] = &[
    (8, "Hirni Falls", "Less crowded but breathtaking waterfall in dense forests.", 22.8667, 85.3333, "/assets/images/hirni.jpg"),
    (9, "Lodh Falls", "The highest waterfall in Jharkhand, cascading from 143 meters.", 23.4806, 84.0194, "/assets/images/lodh.jpg"),
    (10, "Sita Falls", "A serene waterfall surrounded by mythological significance.", 23.34196, 85.6439, "/assets/images/sita.jpg"),
    (15, "Udhwa Bird Sanctuary", "A haven for migratory birds, located on the banks of the Ganges river.", 24.9953, 87.8103, "/assets/images/udhwa.jpg"),
];

#[rustfmt::skip]
const CULTURAL_SITES: &[Row] = &[
    (11, "Jagannath Temple", "Historic temple in Ranchi with annual Rath Yatra.", 23.3169, 85.2817, "/assets/images/jagannath.jpg"),
    (12, "Sun Temple", "Ancient temple dedicated to the Sun God, with unique architecture.", 23.285, 85.352, "/assets/images/sun.jpg"),
    (13, "Pahari Mandir", "Sacred temple on a hilltop offering panoramic views of Ranchi.", 23.3753, 85.3110, "/assets/images/pahari.jpg"),
    (14, "Baidyanath Jyotirlinga (Deoghar)", "One of the twelve Jyotirlingas, a major pilgrimage site for Hindus.", 24.4828, 86.6952, "/assets/images/baidyanath.jpg"),
];

pub(crate) fn places() -> impl Iterator<Item = Place> {
    [
        (Category::TouristSpots, TOURIST_SPOTS),
        (Category::Wildlife, WILDLIFE),
        (Category::HiddenGems, HIDDEN_GEMS),
        (Category::CulturalSites, CULTURAL_SITES),
    ]
    .into_iter()
    .flat_map(|(category, rows)| {
        rows.iter()
            .map(move |&(id, name, description, lat, lng, image)| Place {
                id: PlaceId(id),
                name: name.to_string(),
                description: description.to_string(),
                position: LatLng::new(lat, lng),
                image: image.to_string(),
                category,
            })
    })
}
