//! Built-in values for the output-type and license fields

use super::OptionEntry;

pub fn output_types() -> Vec<OptionEntry> {
    [
        (1, "Audiovisual", "A series of visual representations imparting an impression of motion"),
        (2, "Collection", "An aggregation of resources"),
        (3, "Data paper", "A factual and objective publication describing a dataset"),
        (4, "Dataset", "Data encoded in a defined structure"),
        (5, "Event", "A non-persistent, time-based occurrence"),
        (6, "Image", "A visual representation other than text"),
        (7, "Interactive resource", "A resource requiring interaction from the user"),
        (8, "Model representation", "A description of a simulation or predictive model"),
        (9, "Physical object", "An inanimate, three-dimensional object or substance"),
        (10, "Service", "An organized system of apparatus and systems"),
        (11, "Software", "A computer program in source code or compiled form"),
        (12, "Sound", "A resource primarily intended to be heard"),
        (13, "Text", "A resource consisting primarily of words for reading"),
        (14, "Workflow", "A structured series of steps which can be executed"),
    ]
    .into_iter()
    .map(|(id, name, description)| OptionEntry::builtin(id, name, "", description))
    .collect()
}

pub fn licenses() -> Vec<OptionEntry> {
    [
        (
            1,
            "CC-BY-4.0",
            "https://creativecommons.org/licenses/by/4.0/",
            "Creative Commons Attribution 4.0 International",
        ),
        (
            2,
            "CC-BY-SA-4.0",
            "https://creativecommons.org/licenses/by-sa/4.0/",
            "Creative Commons Attribution Share Alike 4.0 International",
        ),
        (
            3,
            "CC-BY-NC-4.0",
            "https://creativecommons.org/licenses/by-nc/4.0/",
            "Creative Commons Attribution Non Commercial 4.0 International",
        ),
        (
            4,
            "CC0-1.0",
            "https://creativecommons.org/publicdomain/zero/1.0/",
            "Creative Commons Zero v1.0 Universal",
        ),
        (
            5,
            "MIT",
            "https://opensource.org/licenses/MIT",
            "MIT License",
        ),
        (
            6,
            "Apache-2.0",
            "https://www.apache.org/licenses/LICENSE-2.0",
            "Apache License 2.0",
        ),
        (
            7,
            "GPL-3.0-only",
            "https://www.gnu.org/licenses/gpl-3.0.html",
            "GNU General Public License v3.0 only",
        ),
    ]
    .into_iter()
    .map(|(id, name, uri, description)| OptionEntry::builtin(id, name, uri, description))
    .collect()
}
