//! Shared test fixtures

/// Two 16px-cell levels side by side: `Level_0` (2x2 cells at the origin,
/// with entities) and `Level_1` (3x2 cells at cell (2, 0), no entity layer).
pub const SAMPLE_PROJECT: &str = r#"{
    "jsonVersion": "1.5.3",
    "worldGridWidth": 16,
    "worldGridHeight": 16,
    "defs": {
        "entities": [
            { "identifier": "Player", "uid": 1 },
            { "identifier": "Npc", "uid": 2 }
        ],
        "layers": [
            {
                "identifier": "IntGrid",
                "type": "IntGrid",
                "intGridValues": [
                    { "value": 1, "identifier": "platform" },
                    { "value": 2, "identifier": "spikes" },
                    { "value": 3, "identifier": null }
                ]
            },
            { "identifier": "Entities", "type": "Entities", "intGridValues": [] }
        ]
    },
    "levels": [
        {
            "identifier": "Level_0",
            "uid": 10,
            "pxWid": 32,
            "pxHei": 32,
            "worldX": 0,
            "worldY": 0,
            "layerInstances": [
                {
                    "__identifier": "Entities",
                    "__type": "Entities",
                    "intGridCsv": [],
                    "entityInstances": [
                        { "__identifier": "Player", "px": [8, 8], "fieldInstances": [] },
                        {
                            "__identifier": "Npc",
                            "px": [16, 8],
                            "fieldInstances": [
                                { "__identifier": "to", "__type": "Point", "__value": { "cx": 1, "cy": 1 } },
                                { "__identifier": "speech", "__type": "String", "__value": "Hello \"pup\"!" },
                                { "__identifier": "hp", "__type": "Int", "__value": 3 }
                            ]
                        }
                    ]
                },
                {
                    "__identifier": "IntGrid",
                    "__type": "IntGrid",
                    "intGridCsv": [0, 1, 1, 2],
                    "entityInstances": []
                }
            ]
        },
        {
            "identifier": "Level_1",
            "uid": 11,
            "pxWid": 48,
            "pxHei": 32,
            "worldX": 32,
            "worldY": 0,
            "layerInstances": [
                {
                    "__identifier": "IntGrid",
                    "__type": "IntGrid",
                    "intGridCsv": [1, 1, 1, 0, 0, 0],
                    "entityInstances": []
                }
            ]
        }
    ]
}"#;

/// The sample project bound to the schema
pub fn sample_project() -> crate::ldtk::LdtkProject {
    crate::ldtk::load_project_from_str(SAMPLE_PROJECT, "sample").unwrap()
}
