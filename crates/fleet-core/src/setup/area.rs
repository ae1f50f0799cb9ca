//! Built-in Operating Area
//!
//! The mining concession used when no boundary file is configured.

use fleet_events::GeoPoint;

use crate::error::BoundaryError;
use crate::geometry::Boundary;

/// Name carried by the built-in area.
pub const MINING_AREA_NAME: &str = "PT INDOBARA";

/// Outer ring of the concession as (longitude, latitude), closed.
const MINING_AREA_RING: [[f64; 2]; 71] = [
    [115.604399949931505, -3.545400075547209],
    [115.604399841131098, -3.608799574004828],
    [115.649400029697503, -3.608799509217319],
    [115.649400017089704, -3.663100293456181],
    [115.617400059975793, -3.663099780174879],
    [115.617399737213503, -3.685699156803738],
    [115.649299960676103, -3.685699068800897],
    [115.649300362663595, -3.699299673460462],
    [115.617800049745696, -3.699300020057011],
    [115.6177999530113, -3.717199908413447],
    [115.658299919322602, -3.717200000114277],
    [115.6582955763173, -3.473005894715275],
    [115.568699602091598, -3.473001685807625],
    [115.568700182646694, -3.464001541662113],
    [115.555099828419003, -3.463999391784724],
    [115.555099291465098, -3.473003271644793],
    [115.532700208403895, -3.473001476768178],
    [115.532699846387402, -3.463900605411753],
    [115.550701359743002, -3.463902395098822],
    [115.5507013482556, -3.454898213912309],
    [115.568701230550005, -3.454902873855015],
    [115.568700726908006, -3.445900276606981],
    [115.577700266719404, -3.445900134950424],
    [115.577700019488205, -3.431898966201222],
    [115.559699638559096, -3.431899648314737],
    [115.559699554334102, -3.437400397522957],
    [115.550100512253806, -3.437398099998878],
    [115.550099020797404, -3.450002211390146],
    [115.532703272530895, -3.449999179807085],
    [115.532700637088993, -3.454899270607867],
    [115.523702194253303, -3.454899042442723],
    [115.523699255391406, -3.463901335023041],
    [115.517901076646893, -3.463899658740474],
    [115.517900197349306, -3.467902281514015],
    [115.514600138263603, -3.467902292826565],
    [115.514601072048507, -3.50010155304351],
    [115.496599227790597, -3.50009900533689],
    [115.496599869340898, -3.518100005601176],
    [115.466797471563495, -3.518103740087548],
    [115.466801168336701, -3.550206921843847],
    [115.442500430814604, -3.550203582815326],
    [115.442497952207603, -3.563204681010987],
    [115.432199323066001, -3.563200126588743],
    [115.432199985374197, -3.575400350745974],
    [115.4738011947736, -3.575400021250577],
    [115.473797766754501, -3.667299052802766],
    [115.478300326726696, -3.667298846101514],
    [115.478299650158803, -3.699001512244875],
    [115.473698702561805, -3.698999777578339],
    [115.473698840205799, -3.706300548298581],
    [115.481699037262302, -3.706400782574116],
    [115.4817010345688, -3.717102490691376],
    [115.505201004278504, -3.717098288779876],
    [115.505299006694997, -3.635700209735227],
    [115.487399266748895, -3.635701682784649],
    [115.487397660302193, -3.545299693708786],
    [115.5010009898878, -3.545299520128636],
    [115.500999334020705, -3.536300365773843],
    [115.514602134835499, -3.536297749737575],
    [115.514599616947706, -3.518200242642467],
    [115.532599668902606, -3.518200602467881],
    [115.532599481961398, -3.509199349853453],
    [115.541641655013905, -3.509228095023962],
    [115.541599827827795, -3.500200339853857],
    [115.577599166446404, -3.500199675893057],
    [115.577599706645202, -3.509299212907206],
    [115.604599070000702, -3.509301495077436],
    [115.604600094546797, -3.518300046458291],
    [115.613499987067996, -3.518300064005411],
    [115.613499543131596, -3.54540116002996],
    [115.604399949931505, -3.545400075547209],
];

/// The built-in mining concession boundary.
pub fn mining_area() -> Result<Boundary, BoundaryError> {
    let ring = MINING_AREA_RING.iter().copied().map(GeoPoint::from).collect();
    Ok(Boundary::new(vec![ring])?.with_name(MINING_AREA_NAME))
}
