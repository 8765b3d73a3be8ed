// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedded demo datasets.

/// Country happiness scores with GDP per capita (bubble chart input).
pub(crate) const HAPPINESS_DSV: &str = "\
country,happiness,gdp,continent
Finland,7.8,48.8,Europe
Denmark,7.6,60.2,Europe
Iceland,7.5,59.3,Europe
Switzerland,7.5,86.6,Europe
Netherlands,7.4,52.3,Europe
Canada,7.0,51.9,Americas
United States,6.9,63.5,Americas
Brazil,6.3,8.9,Americas
Mexico,6.5,9.9,Americas
Japan,5.9,40.1,Asia
South Korea,5.8,31.5,Asia
Thailand,5.9,7.8,Asia
India,3.8,2.1,Asia
Kenya,4.5,1.9,Africa
South Africa,4.9,6.0,Africa
Egypt,4.3,3.6,Africa
Australia,7.2,51.8,Oceania
New Zealand,7.2,41.8,Oceania
";

/// A household money flow (Sankey input). Node categories are the name
/// prefix up to the first space.
pub(crate) const BUDGET_DSV: &str = "\
source,target,value
Income wages,Budget,52.0
Income interest,Budget,3.5
Budget,Taxes federal,11.0
Budget,Taxes state,4.0
Budget,Housing rent,14.0
Budget,Housing utilities,3.0
Budget,Living food,8.0
Budget,Living transport,4.5
Budget,Savings index,8.0
Budget,Savings cash,3.0
";

/// Monthly temperature spans per city (ridgeline input). The `low` and
/// `extra` columns stack into the ridge height.
pub(crate) const CLIMATE_DSV: &str = "\
city,month,low,extra
Oslo,1,1.0,5.2
Oslo,4,5.1,7.3
Oslo,7,13.2,9.1
Oslo,10,6.0,6.5
Lisbon,1,8.3,6.6
Lisbon,4,11.3,8.1
Lisbon,7,18.0,9.8
Lisbon,10,14.1,7.9
Singapore,1,23.3,7.1
Singapore,4,24.6,7.6
Singapore,7,24.9,6.4
Singapore,10,24.1,7.4
";
